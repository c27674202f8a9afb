//! Default values for config fields, re-exported from `constants`.

pub use crate::constants::{
    DEFAULT_ACTIVITY_MAX, DEFAULT_WEIGHT_FINAL_EXAM, DEFAULT_WEIGHT_FORMATIVE,
    DEFAULT_WEIGHT_SUMMATIVE, GRADE_SCALE_MAX, PASS_THRESHOLD,
};
