use clap::Parser;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use overland_generator::ascii;
use overland_generator::explorer;
use overland_generator::export;
use overland_generator::grid::Direction;
use overland_generator::seeds::derive_seed;
use overland_generator::segment::{SegmentManager, SegmentSize};
use overland_generator::tileset::Tileset;

#[derive(Parser, Debug)]
#[command(name = "overland_generator")]
#[command(about = "Generate an explorable overland of stitched map segments")]
struct Args {
    /// Width of each segment in tiles
    #[arg(short = 'W', long, default_value = "32")]
    width: usize,

    /// Height of each segment in tiles
    #[arg(short = 'H', long, default_value = "32")]
    height: usize,

    /// Master seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Take N random segment crossings, printing each visited segment
    #[arg(long)]
    walk: Option<usize>,

    /// Print the starting segment as ASCII
    #[arg(long)]
    ascii: bool,

    /// Save the starting segment to a timestamped ASCII file
    #[arg(long)]
    save_ascii: bool,

    /// Export the starting segment to a PNG (specify output path)
    #[arg(long)]
    export_png: Option<String>,

    /// Pixels per tile for PNG export
    #[arg(long, default_value = "8")]
    png_scale: u32,

    /// Export the starting segment as JSON (specify output path)
    #[arg(long)]
    export_json: Option<String>,

    /// Walk the world interactively in the terminal
    #[arg(long)]
    explore: bool,
}

fn main() {
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    println!("Generating overland with seed: {}", seed);
    println!("Segment size: {}x{}", args.width, args.height);

    let size = SegmentSize {
        width: args.width,
        height: args.height,
    };
    let mut manager = SegmentManager::new(Tileset::standard(), size, seed);
    println!(
        "{}",
        ascii::describe_segment(manager.current(), manager.current_coord())
    );

    if args.ascii {
        print!("{}", ascii::render_segment(manager.current(), manager.tileset()));
    }

    if args.save_ascii {
        match ascii::export_ascii(manager.current(), manager.tileset(), "start") {
            Ok(filename) => println!("Wrote {}", filename),
            Err(e) => eprintln!("ASCII export failed: {}", e),
        }
    }

    if let Some(path) = &args.export_png {
        match export::export_segment_png(manager.current(), manager.tileset(), path, args.png_scale)
        {
            Ok(()) => println!("Wrote {}", path),
            Err(e) => eprintln!("PNG export failed: {}", e),
        }
    }

    if let Some(path) = &args.export_json {
        match export::export_segment_json(manager.current(), manager.current_coord(), path) {
            Ok(()) => println!("Wrote {}", path),
            Err(e) => eprintln!("JSON export failed: {}", e),
        }
    }

    if let Some(steps) = args.walk {
        let mut rng = ChaCha8Rng::seed_from_u64(derive_seed(seed, "walk"));
        for _ in 0..steps {
            let dir = *Direction::ALL.choose(&mut rng).unwrap_or(&Direction::Right);
            manager.move_to(dir);
            println!(
                "{}",
                ascii::describe_segment(manager.current(), manager.current_coord())
            );
        }
        println!(
            "Visited {} crossings, {} unique segments generated",
            steps,
            manager.generated_count()
        );
    }

    if args.explore {
        if let Err(e) = explorer::run_explorer(&mut manager) {
            eprintln!("Explorer error: {}", e);
        }
    }
}
