//! Files handed to the launcher that runs inside the Gradle process.

mod handoff;

pub use handoff::{
    read_json, write_json, HandOff, ENV_FILE, JVM_ARGS_FILE, PARAMS_FILE, TASKS_FILE,
};
