use tudu::commands::Cli;

fn main() -> anyhow::Result<()> {
    Cli::menu()
}
