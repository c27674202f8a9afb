/// Aula engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Top of the grade scale.
pub const GRADE_SCALE_MAX: f64 = 20.0;

/// Passing grade on the 0–20 scale.
pub const PASS_THRESHOLD: f64 = 11.0;

/// Points assumed for an activity that does not declare a maximum score.
pub const DEFAULT_ACTIVITY_MAX: f64 = 20.0;

/// Default category weights (percent): formative, summative, final exam.
/// These sum to 80, not 100. Carried over from the platform's historical
/// configuration. Sections that want a full scale must configure their own
/// weights; renormalizing here would change every grade computed under
/// defaults.
pub const DEFAULT_WEIGHT_FORMATIVE: f64 = 10.0;
pub const DEFAULT_WEIGHT_SUMMATIVE: f64 = 30.0;
pub const DEFAULT_WEIGHT_FINAL_EXAM: f64 = 40.0;
