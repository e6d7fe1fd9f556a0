use crate::tools::env_args::retrieve_arg_value_or_default;
use crate::web::frontend::frontend_controller;
use crate::web::server::Server;
use rocket::fs::FileServer;
use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;

const STATIC_FILES_ENV_ARG: &str = "--static-files";
const DEFAULT_STATIC_FILES_DIR: &str = "./public/static";

pub struct FrontendServer {
    static_files_dir: String,
}

impl FrontendServer {
    pub fn new() -> Self {
        Self {
            static_files_dir: retrieve_arg_value_or_default(
                STATIC_FILES_ENV_ARG,
                DEFAULT_STATIC_FILES_DIR,
            ),
        }
    }
}

impl Server for FrontendServer {
    fn configure(&self, rocket_build: Rocket<Build>) -> Rocket<Build> {
        rocket_build
            .mount(
                "/",
                routes![
                    frontend_controller::application_form,
                    frontend_controller::success,
                    frontend_controller::application_status,
                ],
            )
            .mount("/", FileServer::from(&self.static_files_dir))
            .register("/", catchers![frontend_controller::not_found])
            .attach(Template::fairing())
    }
}
