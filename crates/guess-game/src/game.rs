//! Game logic for the number-guessing game.
//!
//! The session loop and round logic are generic over the RNG and the
//! input/output streams so tests can drive them with a seeded RNG and
//! in-memory buffers.

use std::cmp::Ordering;
use std::io::{self, BufRead, Write};

use rand::Rng;

// ============================================================================
// Difficulty
// ============================================================================

/// Difficulty tier, mapping to the upper bound of the secret range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    /// Secret drawn from 1-10.
    Easy,
    /// Secret drawn from 1-50.
    Medium,
    /// Secret drawn from 1-100.
    Hard,
}

impl Difficulty {
    /// Parses a menu choice. Anything other than `1`, `2`, or `3` is
    /// `None`; the caller decides the fallback.
    #[must_use]
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::Easy),
            "2" => Some(Self::Medium),
            "3" => Some(Self::Hard),
            _ => None,
        }
    }

    /// Upper bound of the secret range for this tier.
    #[must_use]
    pub const fn upper_bound(self) -> u32 {
        match self {
            Self::Easy => 10,
            Self::Medium => 50,
            Self::Hard => 100,
        }
    }
}

// ============================================================================
// Session loop
// ============================================================================

/// Runs the full game session: difficulty selection, rounds, best-score
/// tracking, and the replay prompt.
///
/// The best score lives only for this session; it is never written to
/// disk. Any replay answer other than a case-insensitive `yes` ends
/// the session, as does end of input.
pub fn run<R, I, W>(rng: &mut R, input: &mut I, output: &mut W) -> io::Result<()>
where
    R: Rng,
    I: BufRead,
    W: Write,
{
    writeln!(output, "Welcome to the Number Guessing Game!")?;
    let mut best_score: Option<u32> = None;

    loop {
        writeln!(output, "Choose difficulty level:")?;
        writeln!(output, "1. Easy (1-10)")?;
        writeln!(output, "2. Medium (1-50)")?;
        writeln!(output, "3. Hard (1-100)")?;
        write!(output, "Enter 1, 2, or 3: ")?;
        output.flush()?;

        let Some(choice) = read_line(input)? else {
            break;
        };
        let difficulty = match Difficulty::from_choice(&choice) {
            Some(difficulty) => difficulty,
            None => {
                writeln!(output, "Invalid choice, defaulting to Easy.")?;
                Difficulty::Easy
            }
        };

        let Some(attempts) = play_round(rng, input, output, difficulty.upper_bound())? else {
            break;
        };

        if best_score.map_or(true, |best| attempts < best) {
            best_score = Some(attempts);
            writeln!(output, "New best score: {attempts} attempts!")?;
        }

        write!(output, "Do you want to play again? (yes/no): ")?;
        output.flush()?;
        let Some(replay) = read_line(input)? else {
            break;
        };
        if !replay.eq_ignore_ascii_case("yes") {
            writeln!(output, "Thanks for playing! Goodbye.")?;
            break;
        }
    }

    Ok(())
}

/// Plays one round: draws a secret in `[1, upper_bound]` and loops
/// until the player guesses it.
///
/// Non-integer input is rejected and re-prompted without counting as
/// an attempt. Returns the attempt count, or `None` if the input
/// stream ended mid-round.
pub fn play_round<R, I, W>(
    rng: &mut R,
    input: &mut I,
    output: &mut W,
    upper_bound: u32,
) -> io::Result<Option<u32>>
where
    R: Rng,
    I: BufRead,
    W: Write,
{
    let secret = rng.random_range(1..=upper_bound);
    let mut attempts: u32 = 0;

    writeln!(
        output,
        "I'm thinking of a number between 1 and {upper_bound}. Try to guess it!"
    )?;

    loop {
        write!(output, "Your guess: ")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        let Ok(guess) = line.parse::<i64>() else {
            writeln!(output, "Please enter a valid integer.")?;
            continue;
        };

        attempts += 1;
        match guess.cmp(&i64::from(secret)) {
            Ordering::Less => writeln!(output, "Higher!")?,
            Ordering::Greater => writeln!(output, "Lower!")?,
            Ordering::Equal => {
                writeln!(
                    output,
                    "Congratulations! You guessed the number in {attempts} attempts."
                )?;
                return Ok(Some(attempts));
            }
        }
    }
}

/// Reads one trimmed line, or `None` at end of input.
fn read_line<I: BufRead>(input: &mut I) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

// ============================================================================
// Tests
// ============================================================================
