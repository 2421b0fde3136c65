//! Confirm: A styled confirmation prompt followed by a menu.
//!
//! Run with `cargo run --example confirm` from an interactive terminal. Pass
//! `-v` or `-vv` for diagnostics on standard error.

use std::io::{stdout, Write};

use keytty::err::{report, Error};
use keytty::opt::{Options, Volume};
use keytty::style::Style;
use keytty::{Accept, KeyReader};

/// The menu entries, as key, label, and style.
const MENU: [(char, &str, &str); 4] = [
    ('r', "red", Style::FG_RED),
    ('o', "orange", Style::FG_ORANGE),
    ('p', "purple", Style::FG_PURPLE),
    ('q', "quit", Style::DIM),
];

fn options() -> Options {
    let volume = match std::env::args().nth(1).as_deref() {
        Some("-v") => Volume::Regular,
        Some("-vv") => Volume::Detailed,
        _ => Volume::Silent,
    };

    Options::builder().volume(volume).build()
}

fn run() -> Result<(), Error> {
    let mut keys = KeyReader::stdio_with_options(options());

    let prompt = format!(
        "{}{}Pick a color?{} (y/n): ",
        Style::HEADER,
        Style::BOLD,
        Style::ENDC
    );
    if keys.read_char(&prompt, &Accept::only(['y', 'n']))? == 'n' {
        return Ok(());
    }

    let mut out = stdout().lock();
    for (key, label, style) in MENU {
        writeln!(
            out,
            "  {}{}{}  {}{}{}",
            Style::INVERSE,
            key,
            Style::ENDC,
            style,
            label,
            Style::ENDC
        )?;
    }
    drop(out);

    let accept: Accept = MENU.iter().map(|(key, _, _)| *key).collect();
    let choice = keys.read_char("Your choice: ", &accept)?;

    if let Some((_, label, style)) = MENU.iter().find(|(key, _, _)| *key == choice) {
        let mut out = stdout().lock();
        writeln!(out, "{}You picked {}.{}", style, label, Style::ENDC)?;
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        report(&error);
        std::process::exit(1);
    }
}
