#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(i64),
    TaskUpdated(i64),
    TaskDeleted(i64),
    TaskNotFoundWithId(i64),
    TaskNotPersisted,
    TasksDeletedCount(usize),
    NoTasksFound,
    TasksHeader,
    TaskCompleted(i64),
    TaskReopened(i64),
    ConfirmDeleteTask(String),
    ConfirmDeleteAllTasks(usize),
    DayViewHeader(String), // date
    NoTasksForDay(String), // date

    // === SUBTASK MESSAGES ===
    SubtaskAdded(i64),    // subtask id
    SubtaskNotFound(i64), // subtask id
    SubtaskToggled(i64),
    SubtaskRemoved(i64),

    // === NOTE MESSAGES ===
    NoteAdded(i64),    // note id
    NoteNotFound(i64), // note id
    NoteUpdated(i64),
    NoteRemoved(i64),

    // === TIME TRACKING MESSAGES ===
    TrackingStarted(i64),        // task id
    TrackingStopped(i64, String), // task id, accumulated
    TrackingAlreadyRunning(i64),
    TrackingNotRunning(i64),

    // === CATEGORY MESSAGES ===
    CategoryCreated(String),
    CategoryUpdated(String),
    CategoryDeleted(String, usize), // name, cleared task refs
    CategoryNotFoundWithId(i64),
    CategoryNotPersisted,
    NoCategoriesFound,
    CategoriesHeader,
    ConfirmDeleteCategory(String),
    CategoryParentInvalid(i64),

    // === TEMPLATE MESSAGES ===
    TemplateCreated(String),
    TemplateUpdated(String),
    TemplateDeleted(String),
    TemplateNotFound(String),
    TemplateAlreadyExists(String),
    NoTemplatesFound,
    TemplatesHeader,
    TemplateApplied(String, i64), // template name, new task id
    ConfirmDeleteTemplate(String),
    SelectTemplate,

    // === SETTINGS MESSAGES ===
    SettingsHeader,
    SettingsSaved,
    UnknownSettingKey(String),
    InvalidSettingValue(String, String), // key, value

    // === STATISTICS MESSAGES ===
    StatsRecomputed(String), // date
    StatsHeader(String),     // date
    StatsWindowHeader(usize), // days
    NoStatsForDate(String),

    // === DATABASE MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    MigrationHistory,
    ConfirmResetDatabase,
    DatabaseResetCompleted,
    DatabaseResetFailed,

    // === VALIDATION MESSAGES ===
    InvalidDate(String),
    InvalidPriority(String),
    InvalidWeekStart(String),
    InvalidRecurrence(String),
    InvalidStatusFilter(String),

    // === PROMPTS ===
    PromptTaskTitle,
    PromptTaskDescription,
    PromptTaskDueDate,
    PromptTaskPriority,
    PromptSubtaskText,
    PromptNoteContent,
    PromptCategoryName,
    PromptCategoryColor,
    PromptTemplateName,
    PromptTemplateDescription,

    // === GENERAL MESSAGES ===
    SelectTaskAction,
    SelectCategoryAction,
    SelectTemplateAction,
    OperationCancelled,
}
