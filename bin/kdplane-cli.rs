use kdplane::client::{load_tree, write_points, CliArgs, Command, OutputFormat, OutputFormatter};
use kdplane::config::LoggingConfig;
use kdplane::{KdPlaneConfig, KdTree, Point, Rectangle, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use tracing::{info, Level};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", OutputFormatter::format_error(&e.to_string()));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse_args();
    args.validate()?;

    // 生成默认配置文件
    if args.generate_config {
        let config = KdPlaneConfig::default();
        config.save_to_file(&args.config)?;
        println!("✅ Generated default configuration: {}", args.config);
        return Ok(());
    }

    // 加载配置
    let mut config = KdPlaneConfig::from_file(&args.config)?;

    // 命令行参数覆盖配置文件
    if let Some(log_level) = args.log_level {
        config.logging.level = log_level;
    }

    // 验证配置
    config.validate()?;

    // 初始化日志系统
    init_logging(&config.logging)?;

    let bounds = config.tree.bounds()?;
    info!("kdplane-cli {} with bounds {}", env!("CARGO_PKG_VERSION"), bounds);

    match args.command {
        Some(command) => run_command(command, bounds),
        None => Ok(()),
    }
}

fn run_command(command: Command, bounds: Rectangle) -> Result<()> {
    match command {
        Command::Contains { input, x, y } => {
            let tree = load_tree(&input, bounds)?;
            let point = Point::new(x, y);
            let found = tree.contains(&point)?;
            println!("{}", OutputFormatter::format_contains(&point, found));
        }
        Command::Range {
            input,
            x_min,
            y_min,
            x_max,
            y_max,
            format,
        } => {
            let tree = load_tree(&input, bounds)?;
            let query = Rectangle::try_new(x_min, y_min, x_max, y_max)?;
            let points = tree.range(&query)?;
            let output = match format {
                OutputFormat::Text => OutputFormatter::format_points(&points),
                OutputFormat::Json => OutputFormatter::points_to_json(&points)?,
                OutputFormat::Geojson => OutputFormatter::points_to_geojson(&points)?,
            };
            println!("{}", output);
        }
        Command::Nearest { input, x, y } => {
            let tree = load_tree(&input, bounds)?;
            let query = Point::new(x, y);
            let nearest = tree.nearest_with_distance(&query)?;
            println!("{}", OutputFormatter::format_nearest(&query, nearest));
        }
        Command::Export { input, output } => {
            let tree = load_tree(&input, bounds)?;
            let json = tree.export_to_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    info!("exported tree with {} nodes to {}", tree.len(), path.display());
                }
                None => println!("{}", json),
            }
        }
        Command::Stats { input } => {
            let tree = load_tree(&input, bounds)?;
            println!("{}", OutputFormatter::format_stats(&tree));
        }
        Command::Generate {
            count,
            seed,
            output,
        } => {
            let tree = generate_tree(bounds, count, seed)?;
            save_tree(&tree, &output)?;
            println!(
                "✅ Generated {} points into {}",
                tree.len(),
                output.display()
            );
        }
    }

    Ok(())
}

/// 在边界内均匀生成随机点
fn generate_tree(bounds: Rectangle, count: usize, seed: Option<u64>) -> Result<KdTree> {
    // 跨度溢出时 gen_range 会 panic
    if !bounds.width().is_finite() || !bounds.height().is_finite() {
        return Err(format!("Cannot sample points in {}: width and height must be finite", bounds).into());
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let points = (0..count).map(|_| {
        Point::new(
            rng.gen_range(bounds.x_min()..=bounds.x_max()),
            rng.gen_range(bounds.y_min()..=bounds.y_max()),
        )
    });
    Ok(KdTree::from_points(bounds, points)?)
}

/// `.txt` 写成点文件，其他扩展名写成快照
fn save_tree(tree: &KdTree, path: &Path) -> Result<()> {
    if kdplane::client::points_file::is_points_file(path) {
        let points: Vec<Point> = tree.points().collect();
        write_points(path, &points)?;
    } else {
        tree.dump_to_file(path)?;
    }
    Ok(())
}

/// 初始化日志系统
fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    match (config.output.as_str(), &config.log_file) {
        ("file", Some(log_file)) => {
            // 确保日志目录存在
            if let Some(parent) = log_file.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)?;

            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::sync::Mutex::new(file))
                        .with_ansi(false)
                        .with_target(false),
                )
                .with(tracing_subscriber::filter::LevelFilter::from_level(filter))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false),
                )
                .with(tracing_subscriber::filter::LevelFilter::from_level(filter))
                .init();
        }
    }

    Ok(())
}
