//! robots-check: CLI tool for parsing robots.txt files and checking URLs.

use clap::{Parser, Subcommand};
use robots_exclusion::{matcher, RobotExclusionConfig, RobotExclusionService, Robots};
use std::fs;
use std::path::PathBuf;
use url::Url;

#[derive(Parser)]
#[command(name = "robots-check")]
#[command(version)]
#[command(about = "Parse robots.txt files and check crawler access", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check URLs against their live robots.txt
    Check {
        /// Crawler agent string
        #[arg(short, long)]
        agent: String,

        /// URLs to check
        #[arg(required = true)]
        urls: Vec<String>,

        /// YAML or JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum number of cached robots.txt files
        #[arg(long)]
        cache_max_size: Option<usize>,

        /// Hours a cached robots.txt stays valid
        #[arg(long)]
        expires_hours: Option<u64>,
    },

    /// Print the groups of a local robots.txt
    Parse {
        /// robots.txt file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Evaluate paths against a local robots.txt
    Eval {
        /// robots.txt file
        #[arg(short, long)]
        input: PathBuf,

        /// Crawler agent string
        #[arg(short, long)]
        agent: String,

        /// Paths to evaluate (e.g. /private/page?x=1)
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            agent,
            urls,
            config,
            cache_max_size,
            expires_hours,
        } => check(&agent, &urls, config, cache_max_size, expires_hours),
        Commands::Parse { input } => parse(&input),
        Commands::Eval {
            input,
            agent,
            paths,
        } => eval(&input, &agent, &paths),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn check(
    agent: &str,
    urls: &[String],
    config_path: Option<PathBuf>,
    cache_max_size: Option<usize>,
    expires_hours: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match config_path {
        Some(path) => RobotExclusionConfig::load(path)?,
        None => RobotExclusionConfig::default(),
    };
    if let Some(size) = cache_max_size {
        config = config.with_cache_max_size_records(size);
    }
    if let Some(hours) = expires_hours {
        config = config.with_cached_expires_hours(hours);
    }

    let service = RobotExclusionService::from_config(config)?;
    service.start()?;

    for raw in urls {
        let url = Url::parse(raw)?;
        let verdict = if service.is_allowed(agent, &url) {
            "ALLOW"
        } else {
            "DISALLOW"
        };
        println!("{}\t{}", verdict, url);
    }

    service.stop();
    Ok(())
}

fn load_robots(input: &PathBuf) -> Result<Robots, Box<dyn std::error::Error>> {
    let file = fs::File::open(input)?;
    Ok(Robots::parse(file)?)
}

fn parse(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let robots = load_robots(input)?;

    println!("{} group(s)", robots.groups().len());
    for (idx, group) in robots.groups().iter().enumerate() {
        println!("[{}] user-agent: {}", idx, group.user_agents().join(", "));
        for directive in group.path_directives() {
            let kind = if directive.is_allowed() {
                "allow"
            } else {
                "disallow"
            };
            println!("    {}: {}", kind, directive.value());
        }
        for directive in group.other_directives() {
            println!("    {}: {}", directive.name(), directive.value());
        }
    }

    Ok(())
}

fn eval(input: &PathBuf, agent: &str, paths: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let robots = load_robots(input)?;

    match matcher::best_matching_group(robots.groups(), agent) {
        Some(group) => println!("group: {}", group.user_agents().join(", ")),
        None => println!("group: none"),
    }

    for path in paths {
        let verdict = if matcher::is_path_allowed(&robots, agent, path) {
            "ALLOW"
        } else {
            "DISALLOW"
        };
        println!("{}\t{}", verdict, path);
    }

    Ok(())
}
