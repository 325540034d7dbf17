use clap::Parser;
use log::info;

use boolalg::canonical::canonicalize;
use boolalg::config::ReducerConfig;
use boolalg::parser::parse;
use boolalg::reducer::Reducer;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Expression to process, e.g. "a * (b + !c)".
    #[arg(value_name = "EXPR")]
    expression: String,

    /// Print the truth table.
    #[clap(long)]
    table: bool,

    /// Print the canonical form.
    #[clap(long)]
    canonical: bool,

    /// Print the reduced form.
    #[clap(long)]
    reduce: bool,

    /// Maximum number of rewrite passes during reduction.
    #[clap(long, value_name = "INT", default_value = "2000")]
    max_passes: usize,

    /// Maximum number of expression nodes during reduction.
    #[clap(long, value_name = "INT", default_value = "20000")]
    max_nodes: usize,

    /// Log every rewrite.
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let level = if args.verbose {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let expression = parse(&args.expression).map_err(boolalg::Error::from)?;
    println!("expression = {}", expression);

    if args.table {
        println!("{}", expression.generate_truth_table());
    }

    if args.canonical {
        println!("canonical = {}", canonicalize(&expression));
    }

    if args.reduce {
        let time_reduce = std::time::Instant::now();
        let config = ReducerConfig::new(args.max_passes, args.max_nodes);
        let mut reducer = Reducer::with_config(&expression, config);
        let reduced = reducer.reduce().map_err(boolalg::Error::from)?;
        info!(
            "reduced in {} passes ({:.3} s)",
            reducer.passes(),
            time_reduce.elapsed().as_secs_f64()
        );
        println!("reduced = {}", reduced);

        if args.table {
            println!("{}", reduced.generate_truth_table());
        }
    }

    Ok(())
}
