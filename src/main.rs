// src/main.rs
use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use chess_rules::{Board, GameStatus, MoveError, SaveLoadError, Square};
use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

// --- Constants ---
const DEFAULT_SAVE_FILENAME: &str = "chess_board.json";

lazy_static! {
    // "1 4 3 4", "14 34", "1,4 3,4", "(1,4)->(3,4)"
    static ref MOVE_PATTERN: Regex = Regex::new(
        r"^\(?\s*([0-7])\s*,?\s*([0-7])\s*\)?\s*(?:->|-|\s)\s*\(?\s*([0-7])\s*,?\s*([0-7])\s*\)?$"
    ).expect("move pattern is a valid regex");
    // "moves 1 4", "moves (1,4)"
    static ref QUERY_PATTERN: Regex = Regex::new(
        r"^moves\s+\(?\s*([0-7])\s*,?\s*([0-7])\s*\)?$"
    ).expect("query pattern is a valid regex");
}

// --- Command Line Options ---

#[derive(Debug)]
struct Options {
    seed: u64,
    load: Option<String>,
}

impl Options {
    fn from_args(args: impl Iterator<Item = String>) -> Result<Self, CommandError> {
        let mut options = Options { seed: default_seed(), load: None };
        let mut args = args.skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let value = args.next().ok_or_else(|| CommandError::MissingArgument("--seed".to_string()))?;
                    options.seed = value.parse().map_err(|_| CommandError::InvalidArgument(value))?;
                }
                "--load" => {
                    options.load = Some(args.next().ok_or_else(|| CommandError::MissingArgument("--load".to_string()))?);
                }
                other => return Err(CommandError::InvalidArgument(other.to_string())),
            }
        }
        Ok(options)
    }
}

fn default_seed() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos() as u64).unwrap_or(0)
}

// --- Input Parsing ---

#[derive(Debug, PartialEq, Eq)]
enum UserInput {
    Move(Square, Square),
    Command(Command),
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Moves(Square),
    All,
    Random,
    History,
    Board,
    Save(String),
    Load(String),
    Help,
    Quit,
}

#[derive(Debug)]
enum CommandError {
    UnknownCommand(String),
    MissingArgument(String),
    InvalidArgument(String),
    SaveLoad(SaveLoadError),
    Move(MoveError),
    NoLegalMoves,
    IoError(io::Error),
}
impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::UnknownCommand(cmd) => write!(f, "Unknown command: '{}'. Type 'help' for commands.", cmd),
            CommandError::MissingArgument(cmd) => write!(f, "Missing argument for: '{}'", cmd),
            CommandError::InvalidArgument(arg) => write!(f, "Invalid argument: '{}'", arg),
            CommandError::SaveLoad(e) => write!(f, "{}", e),
            CommandError::Move(e) => write!(f, "{}", e),
            CommandError::NoLegalMoves => write!(f, "The side to move has no legal moves."),
            CommandError::IoError(e) => write!(f, "Input/Output error: {}", e),
        }
    }
}
impl Error for CommandError {}

impl From<SaveLoadError> for CommandError {
    fn from(e: SaveLoadError) -> Self { CommandError::SaveLoad(e) }
}
impl From<MoveError> for CommandError {
    fn from(e: MoveError) -> Self { CommandError::Move(e) }
}
impl From<io::Error> for CommandError {
    fn from(e: io::Error) -> Self { CommandError::IoError(e) }
}

/// Squares captured by the regexes are always single digits 0-7.
fn square_from_captures(row: &str, col: &str) -> Result<Square, CommandError> {
    let row: i8 = row.parse().map_err(|_| CommandError::InvalidArgument(row.to_string()))?;
    let col: i8 = col.parse().map_err(|_| CommandError::InvalidArgument(col.to_string()))?;
    Square::new(row, col).ok_or_else(|| CommandError::InvalidArgument(format!("({},{})", row, col)))
}

fn parse_user_input(input: &str) -> Result<UserInput, CommandError> {
    let trimmed = input.trim();

    if let Some(caps) = MOVE_PATTERN.captures(trimmed) {
        let from = square_from_captures(&caps[1], &caps[2])?;
        let to = square_from_captures(&caps[3], &caps[4])?;
        return Ok(UserInput::Move(from, to));
    }
    if let Some(caps) = QUERY_PATTERN.captures(&trimmed.to_lowercase()) {
        return Ok(UserInput::Command(Command::Moves(square_from_captures(&caps[1], &caps[2])?)));
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let command_word = parts.next().unwrap_or("").to_lowercase();
    let argument = parts.next().unwrap_or("").trim();
    let filename = || {
        let name = if argument.is_empty() { DEFAULT_SAVE_FILENAME } else { argument };
        name.to_string()
    };

    let command = match command_word.as_str() {
        "moves" => return Err(CommandError::MissingArgument("moves <row> <col>".to_string())),
        "all" => Command::All,
        "random" => Command::Random,
        "history" => Command::History,
        "board" => Command::Board,
        "save" => Command::Save(filename()),
        "load" => Command::Load(filename()),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::UnknownCommand(trimmed.to_string())),
    };
    Ok(UserInput::Command(command))
}

// --- Command Handling ---

/// Plays a move and reports the result. The board is untouched when this fails.
fn play(board: &mut Board, from: Square, to: Square) -> Result<(), CommandError> {
    let outcome = board.try_move(from, to)?;
    print!("Played {}", outcome.record);
    if outcome.is_checkmate() {
        println!(" - checkmate.");
    } else if outcome.is_stalemate() {
        println!(" - stalemate.");
    } else if outcome.check {
        println!(" - check.");
    } else {
        println!(".");
    }
    Ok(())
}

fn play_random(board: &mut Board, rng: &mut StdRng) -> Result<(), CommandError> {
    let moves = board.legal_moves();
    if moves.is_empty() {
        return Err(CommandError::NoLegalMoves);
    }
    let (from, to) = moves[rng.random_range(0..moves.len())];
    play(board, from, to)
}

fn format_squares(squares: &[Square]) -> String {
    squares.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(" ")
}

fn run_command(board: &mut Board, command: Command, rng: &mut StdRng) -> Result<bool, CommandError> {
    match command {
        Command::Moves(square) => {
            let destinations = board.legal_destinations(square);
            if destinations.is_empty() {
                println!("No legal moves from {}.", square);
            } else {
                println!("{} -> {}", square, format_squares(&destinations));
            }
        }
        Command::All => {
            for (from, to) in board.legal_moves() {
                println!("  {} -> {}", from, to);
            }
        }
        Command::Random => play_random(board, rng)?,
        Command::History => {
            if board.move_history().is_empty() {
                println!("No moves played yet.");
            }
            for (i, record) in board.move_history().iter().enumerate() {
                println!("{:>3}. {}", i + 1, record);
            }
        }
        Command::Board => println!("{}", board),
        Command::Save(filename) => {
            board.save_to_file(&filename)?;
            println!("Board saved to '{}'.", filename);
        }
        Command::Load(filename) => {
            *board = Board::load_from_file(&filename)?;
            println!("Board loaded from '{}'.", filename);
        }
        Command::Help => print_help(),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

// --- Main Game Loop ---

fn main() -> Result<(), Box<dyn Error>> {
    let options = match Options::from_args(std::env::args()) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Usage: chess_rules [--seed <u64>] [--load <file>]");
            std::process::exit(2);
        }
    };
    let mut rng = StdRng::seed_from_u64(options.seed);

    let mut board = match &options.load {
        Some(filename) => Board::load_from_file(filename)?,
        None => Board::new(),
    };

    println!("==============================");
    println!("|     Chess Rules Engine     |");
    println!("==============================");
    print_help();

    'game_loop: loop {
        println!("------------------------------------------");
        println!("{}", board);

        if board.status() != GameStatus::Active {
            match board.status().winner() {
                Some(color) => println!("=== GAME OVER: {:?} wins by checkmate. ===", color),
                None => println!("=== GAME OVER: Draw by stalemate. ==="),
            }
            break 'game_loop;
        }

        print!("{:?} to move. Enter move (e.g. 1 4 3 4) or command: ", board.current_turn());
        io::stdout().flush()?;

        let mut input_line = String::new();
        match io::stdin().read_line(&mut input_line) {
            Ok(0) => {
                println!("\nEnd of input detected. Quitting game.");
                break 'game_loop;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}. Try again or use 'quit'.", e);
                continue 'game_loop;
            }
        }
        if input_line.trim().is_empty() { continue 'game_loop; }

        let result = parse_user_input(&input_line).and_then(|input| match input {
            UserInput::Move(from, to) => play(&mut board, from, to).map(|_| true),
            UserInput::Command(command) => run_command(&mut board, command, &mut rng),
        });
        match result {
            Ok(true) => {}
            Ok(false) => {
                println!("Exiting game.");
                break 'game_loop;
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    println!("\nGame session finished.");
    Ok(())
}

/// Prints available commands.
fn print_help() {
    println!("\nAvailable Commands:");
    println!("  <r> <c> <r> <c>  Move the piece on (r,c) to (r,c). Rows 0-7 from White's side,");
    println!("                   columns 0-7. Also accepted: '14 34', '(1,4)->(3,4)'.");
    println!("  moves <r> <c>    List legal destinations of the piece on (r,c).");
    println!("  all              List every legal move for the side to move.");
    println!("  random           Play a random legal move.");
    println!("  history          Show the moves played so far.");
    println!("  board            Redraw the board.");
    println!("  save [file]      Save the board as JSON (default: {}).", DEFAULT_SAVE_FILENAME);
    println!("  load [file]      Load a board saved with 'save'.");
    println!("  help             Show this help message.");
    println!("  quit / exit      Exit the game.");
    println!();
}
