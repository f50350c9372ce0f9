pub mod env_parse;

pub mod utils;

pub use env_parse::{load_dotenv, load_env_file, EnvSource, ProcessEnv};

pub use utils::*;
