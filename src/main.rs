mod tools;
mod web;

#[macro_use]
extern crate rocket;

#[launch]
fn rocket() -> _ {
    env_logger::init();

    web::start_servers()
}
