//! Terminal number-guessing game.
//!
//! Single-threaded, blocking console interaction: pick a difficulty,
//! guess the secret number, and chase a best score that lasts for the
//! length of the session.

mod game;

use std::io;

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    game::run(&mut rand::rng(), &mut stdin.lock(), &mut stdout.lock())
}
