use rocket::{Build, Rocket};

use crate::tools::env_args::{retrieve_arg_value, retrieve_arg_value_or_default};
use crate::web::frontend::server::FrontendServer;

const PORT_ENV_ARG: &str = "--port";
const DEFAULT_PORT: u16 = 8000;
const TEMPLATES_ENV_ARG: &str = "--templates";
const DEFAULT_TEMPLATES_DIR: &str = "./templates";

pub trait Server {
    fn configure(&self, rocket_build: Rocket<Build>) -> Rocket<Build>;
}

pub fn build_server() -> Rocket<Build> {
    let port = get_port();
    let templates_dir = get_templates_dir();
    info!("Serving on port {port}, with templates from {templates_dir}");

    let rocket_build = rocket::build().configure(
        rocket::Config::figment()
            .merge(("port", port))
            .merge(("template_dir", templates_dir)),
    );

    let servers: Vec<Box<dyn Server>> = vec![Box::new(FrontendServer::new())];
    servers
        .iter()
        .fold(rocket_build, |rocket_build, server| server.configure(rocket_build))
}

fn get_port() -> u16 {
    retrieve_arg_value(PORT_ENV_ARG)
        .and_then(|port| {
            port.parse::<u16>()
                .inspect_err(|e| warn!("Invalid port `{port}`, using {DEFAULT_PORT}: {e}"))
                .ok()
        })
        .unwrap_or(DEFAULT_PORT)
}

fn get_templates_dir() -> String {
    retrieve_arg_value_or_default(TEMPLATES_ENV_ARG, DEFAULT_TEMPLATES_DIR)
}
