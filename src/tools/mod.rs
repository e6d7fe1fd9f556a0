pub mod env_args;
