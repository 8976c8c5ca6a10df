#[macro_use]
extern crate rocket;

use iochef_server::rocket_initialize;

#[launch]
fn rocket() -> _ {
    rocket_initialize()
}
