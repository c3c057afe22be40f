//! HTML rendering for the admin guestbook page.
//!
//! Templates are compiled into the binary. Their names end in `.html`, so minijinja escapes every
//! interpolated value.

use minijinja::{Environment, context};
use serde::Serialize;

use crate::db::models::{guests::GuestEntry, stats::Stats};

const ADMIN_GUESTBOOK: &str = "admin_guestbook.html";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

#[derive(Serialize)]
struct GuestRow<'a> {
    name: &'a str,
    message: &'a str,
    status: &'static str,
    ip: &'a str,
    timestamp: String,
}

impl<'a> From<&'a GuestEntry> for GuestRow<'a> {
    fn from(guest: &'a GuestEntry) -> Self {
        Self {
            name: &guest.name,
            message: &guest.message,
            status: guest.status.as_str(),
            ip: guest.ip.as_deref().unwrap_or("unknown"),
            timestamp: guest.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(ADMIN_GUESTBOOK, include_str!("templates/admin_guestbook.html"))?;
    Ok(env)
}

/// Render the admin page listing every entry in the order given
pub fn render_admin_guestbook(guests: &[GuestEntry], stats: &Stats, export_url: &str) -> Result<String, minijinja::Error> {
    let env = environment()?;
    let template = env.get_template(ADMIN_GUESTBOOK)?;
    let rows: Vec<GuestRow<'_>> = guests.iter().map(GuestRow::from).collect();

    template.render(context! {
        guests => rows,
        stats => stats,
        total => guests.len(),
        export_url => export_url,
    })
}
