//! Self-play driver for the four-color placement engine.
//!
//! Runs seeded AI-vs-AI games for any party topology and difficulty and
//! prints the board and final standings. Useful for eyeballing AI behavior
//! and for reproducing a game from its seed.

use clap::Parser;
use colored::{ColoredString, Colorize};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use tetracolor::{catalog, Board, Color, Difficulty, GameSession, PlayerMode, BOARD_SIZE};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of controlling parties (2, 3 or 4)
    #[clap(short, long, default_value_t = 4)]
    parties: usize,

    /// AI strength: novice, balanced or advanced
    #[clap(short, long, default_value = "balanced")]
    difficulty: Difficulty,

    /// Seed for the game's random source; omit for a random game
    #[clap(short, long)]
    seed: Option<u64>,

    /// Print the board after every move instead of only at the end
    #[clap(short, long, action = clap::ArgAction::SetTrue)]
    verbose: bool,
}

fn color_name(color: Color) -> ColoredString {
    match color {
        0 => "Blue".blue(),
        1 => "Yellow".yellow(),
        2 => "Red".red(),
        _ => "Green".green(),
    }
}

fn cell_glyph(occupant: Option<Color>) -> ColoredString {
    match occupant {
        Some(0) => "■".blue(),
        Some(1) => "■".yellow(),
        Some(2) => "■".red(),
        Some(_) => "■".green(),
        None => "·".dimmed(),
    }
}

fn print_board(board: &Board) {
    for row in 0..BOARD_SIZE as i32 {
        let mut line = String::new();
        for col in 0..BOARD_SIZE as i32 {
            line.push_str(&format!("{} ", cell_glyph(board.color_at(row, col))));
        }
        println!("{}", line.trim_end());
    }
}

fn print_standings(session: &GameSession) {
    for (party, score) in session.party_scores() {
        let colors = session.mode().colors_of_party(party);
        let names: Vec<String> = colors
            .iter()
            .map(|&c| color_name(c).to_string())
            .collect();
        println!(
            "Party {} ({}): {} cells left",
            party + 1,
            names.join("/"),
            score
        );
    }
    match session.winner() {
        Some(party) => println!("Party {} wins!", party + 1),
        None => println!("Draw"),
    }
}

fn main() {
    let args = Args::parse();
    let mode = match PlayerMode::from_party_count(args.parties) {
        Some(mode) => mode,
        None => {
            eprintln!("parties must be 2, 3 or 4");
            std::process::exit(2);
        }
    };
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut session = GameSession::new(mode);

    println!(
        "{} parties, {} AI, seed {}",
        args.parties, args.difficulty, seed
    );

    let mut move_number = 0;
    while !session.is_over() {
        let color = session.active_color();
        match session.play_ai_turn(args.difficulty, &mut rng) {
            Some(mv) => {
                move_number += 1;
                if args.verbose {
                    println!(
                        "{:>3}. {} plays {} {}",
                        move_number,
                        color_name(color),
                        catalog().piece(mv.piece).name,
                        mv
                    );
                    print_board(session.get_board());
                }
            }
            None => break,
        }
    }

    println!();
    print_board(session.get_board());
    println!();
    println!("Game over after {} moves.", move_number);
    print_standings(&session);
}
