//! Command line administration for the order dashboard.
//!
//! Two jobs: keep the credential file the server reads, and seed a
//! demo order history so a fresh checkout has something to show.

use std::{
    error::Error,
    fs,
    io::{self, Write as _},
    path::Path,
    process,
};

use chrono::{Datelike, Days, NaiveDate, Weekday};
use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal,
};
use engine::{CredentialTable, Dataset, CSV_HEADERS, TIMESTAMP_FORMAT};

/// Administration companion for the order dashboard.
#[derive(Parser)]
#[command(name = "comanda_admin")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Credential file read by the server.
    #[arg(long, default_value = "config/users.json")]
    credentials: String,
}

#[derive(Subcommand)]
enum Command {
    /// Manage dashboard users.
    User(User),
    /// Generate a demo order history CSV.
    Seed(SeedArgs),
}

#[derive(Args)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand)]
enum UserCommand {
    /// Create a user, prompting for the password.
    Create(UserArgs),
    /// Remove a user.
    Remove(UserArgs),
    /// List usernames.
    List,
}

#[derive(Args)]
struct UserArgs {
    /// Username, exactly as typed on the login form.
    username: String,
}

#[derive(Args)]
struct SeedArgs {
    /// Where to write the generated history.
    #[arg(long, default_value = "data/orders.csv")]
    output: String,

    /// How many days of history to generate, ending at `--end`.
    #[arg(long, default_value_t = 90)]
    days: u32,

    /// Last day of the generated history. Defaults to today.
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Generator seed. The same seed, end date and day count always
    /// produce the same file.
    #[arg(long, default_value_t = 20_240_301)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            let mut table = load_or_default(&cli.credentials)?;
            if table.contains(&args.username) {
                eprintln!(
                    "User {} already exists in {}.",
                    args.username, cli.credentials
                );
                process::exit(1);
            }
            let password = prompt_password_twice()?;
            table.insert(args.username.clone(), password);
            save_table(&cli.credentials, &table)?;
            println!("User {} created in {}.", args.username, cli.credentials);
        }
        Command::User(User {
            command: UserCommand::Remove(args),
        }) => {
            let mut table = load_or_default(&cli.credentials)?;
            if !table.remove(&args.username) {
                eprintln!("User {} not found in {}.", args.username, cli.credentials);
                process::exit(1);
            }
            save_table(&cli.credentials, &table)?;
            println!("User {} removed.", args.username);
        }
        Command::User(User {
            command: UserCommand::List,
        }) => {
            let table = load_or_default(&cli.credentials)?;
            if table.is_empty() {
                println!("No users in {}.", cli.credentials);
            }
            for username in table.usernames() {
                println!("{username}");
            }
        }
        Command::Seed(args) => seed_history(&args)?,
    }

    Ok(())
}

/// Loads the credential table, or starts an empty one if the file does
/// not exist yet.
fn load_or_default(path: &str) -> Result<CredentialTable, Box<dyn Error + Send + Sync>> {
    if Path::new(path).exists() {
        Ok(CredentialTable::load(path)?)
    } else {
        Ok(CredentialTable::default())
    }
}

fn save_table(path: &str, table: &CredentialTable) -> Result<(), Box<dyn Error + Send + Sync>> {
    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut json = serde_json::to_string_pretty(table)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}

/// Restores the terminal's raw mode flag on drop, so an early return
/// from the prompt never leaves the shell unusable.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Reads a password from the terminal, echoing a mask character.
fn prompt_password(label: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(label))?;

    let _guard = RawModeGuard::enable()?;
    let mut password = String::new();

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter => break,
            KeyCode::Backspace => {
                if password.pop().is_some() {
                    execute!(stdout, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                }
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(stdout, Print("\r\n"))?;
                return Err(io::Error::other("interrupted"));
            }
            KeyCode::Char(ch) => {
                password.push(ch);
                execute!(stdout, Print("*"))?;
            }
            _ => {}
        }
    }

    execute!(stdout, Print("\r\n"))?;
    Ok(password)
}

/// Asks for the password twice, giving up after three mismatches.
fn prompt_password_twice() -> io::Result<String> {
    for _ in 0..3 {
        let first = prompt_password("Password: ")?;
        if first.is_empty() {
            println!("Password cannot be empty.");
            continue;
        }
        let second = prompt_password("Repeat password: ")?;
        if first == second {
            return Ok(first);
        }
        println!("Passwords do not match, try again.");
    }

    Err(io::Error::other("too many attempts"))
}

/// Fixed demo menu: category, then dish, unit price and unit cost in
/// cents, and a typical preparation time in minutes.
const MENU: &[(&str, &[(&str, i64, i64, u32)])] = &[
    (
        "Bebidas",
        &[
            ("Suco de Laranja", 9_50, 3_00, 5),
            ("Caipirinha", 18_00, 6_50, 8),
            ("Refrigerante", 7_00, 2_50, 2),
            ("Água com Gás", 6_00, 1_80, 2),
        ],
    ),
    (
        "Carnes",
        &[
            ("Picanha Grelhada", 89_00, 42_00, 40),
            ("Frango à Parmegiana", 52_00, 21_00, 35),
            ("Costela ao Barbecue", 68_00, 30_00, 45),
        ],
    ),
    (
        "Massas",
        &[
            ("Lasanha à Bolonhesa", 45_90, 18_00, 35),
            ("Nhoque ao Sugo", 39_00, 14_50, 30),
            ("Espaguete Carbonara", 42_00, 16_00, 25),
        ],
    ),
    (
        "Sobremesas",
        &[
            ("Pudim de Leite", 14_00, 4_50, 10),
            ("Açaí na Tigela", 19_00, 8_00, 5),
            ("Petit Gâteau", 22_00, 9_00, 15),
        ],
    ),
];

/// Deterministic xorshift generator for the seed command.
///
/// Reproducible histories matter more than randomness quality here,
/// which keeps a whole RNG crate out of the tree.
struct SeedRng(u64);

impl SeedRng {
    fn new(seed: u64) -> Self {
        // Xorshift must not start at zero.
        Self(seed.max(1))
    }

    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Value in `0..bound`.
    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

/// Orders placed on one day. Fridays and weekends run busier.
fn day_volume(rng: &mut SeedRng, day: NaiveDate) -> u64 {
    let base = match day.weekday() {
        Weekday::Fri => 14,
        Weekday::Sat => 18,
        Weekday::Sun => 12,
        _ => 8,
    };
    base + rng.below(5)
}

/// Service hour, weighted towards the lunch and dinner rushes.
fn pick_hour(rng: &mut SeedRng) -> u32 {
    match rng.below(10) {
        0..=3 => 11 + rng.below(3) as u32,
        4 => 15 + rng.below(3) as u32,
        _ => 18 + rng.below(4) as u32,
    }
}

/// Formats cents as the plain `12.34` the history file uses.
fn csv_amount(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

fn seed_history(args: &SeedArgs) -> Result<(), Box<dyn Error + Send + Sync>> {
    if args.days == 0 {
        eprintln!("--days must be at least 1.");
        process::exit(1);
    }

    let end = args.end.unwrap_or_else(|| chrono::Local::now().date_naive());
    let Some(start) = end.checked_sub_days(Days::new(u64::from(args.days) - 1)) else {
        eprintln!("--end {end} is too far in the past for {} days.", args.days);
        process::exit(1);
    };

    if let Some(parent) = Path::new(&args.output).parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut rng = SeedRng::new(args.seed);
    let mut writer = csv::Writer::from_path(&args.output)?;
    writer.write_record(CSV_HEADERS)?;

    for day in start.iter_days().take_while(|day| *day <= end) {
        for _ in 0..day_volume(&mut rng, day) {
            let (category, dishes) = MENU[rng.below(MENU.len() as u64) as usize];
            let (dish, price, cost, prep) = dishes[rng.below(dishes.len() as u64) as usize];

            let placed_at = day
                .and_hms_opt(pick_hour(&mut rng), rng.below(60) as u32, rng.below(60) as u32)
                .ok_or("generated an out-of-range time")?;
            let quantity = 1 + rng.below(3) as u32;
            let prep_minutes = prep + rng.below(12) as u32;
            let rating = 3.0 + rng.below(21) as f64 / 10.0;

            writer.write_record([
                placed_at.format(TIMESTAMP_FORMAT).to_string(),
                category.to_string(),
                dish.to_string(),
                quantity.to_string(),
                csv_amount(price),
                csv_amount(cost),
                prep_minutes.to_string(),
                format!("{rating:.1}"),
            ])?;
        }
    }
    writer.flush()?;

    // Read the file back through the same loader the server uses, so a
    // seed that would not start the server fails right here.
    let dataset = match Dataset::from_csv_path(&args.output) {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("Generated file failed to load back: {err}");
            process::exit(1);
        }
    };

    println!(
        "Wrote {} orders across {} days to {}.",
        dataset.len(),
        args.days,
        args.output
    );
    if let Some((first, last)) = dataset.date_range() {
        println!("History runs {first} to {last}.");
    }
    println!("Categories: {}.", dataset.categories().join(", "));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_the_same_stream() {
        let mut a = SeedRng::new(42);
        let mut b = SeedRng::new(42);

        for _ in 0..100 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn zero_seed_still_produces_values() {
        let mut rng = SeedRng::new(0);
        assert_ne!(rng.next(), 0);
    }

    #[test]
    fn hours_stay_inside_service_time() {
        let mut rng = SeedRng::new(7);
        for _ in 0..500 {
            let hour = pick_hour(&mut rng);
            assert!((11..=21).contains(&hour), "hour {hour} outside service");
        }
    }

    #[test]
    fn volume_reflects_the_weekday() {
        let mut rng = SeedRng::new(7);
        let friday = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        assert!((14..19).contains(&day_volume(&mut rng, friday)));
        assert!((8..13).contains(&day_volume(&mut rng, tuesday)));
    }

    #[test]
    fn amounts_format_with_two_decimal_places() {
        assert_eq!(csv_amount(45_90), "45.90");
        assert_eq!(csv_amount(7_00), "7.00");
        assert_eq!(csv_amount(1_80), "1.80");
        assert_eq!(csv_amount(5), "0.05");
    }
}
