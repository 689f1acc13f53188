use clap::{Parser, Subcommand};
use sharp_transform::asset::{BucketVolume, LocalVolume, Volume};
use sharp_transform::{
    AssetDescriptor, Config, FitMode, FocalPoint, ImageTransform, SharpTransform, TransformRequest,
};
use std::path::PathBuf;

/// Transform flags shared by `url` and `webp-url`.
#[derive(clap::Args, Clone)]
struct TransformArgs {
    /// Storage key of the source asset, e.g. photos/dawn.jpg
    key: String,

    /// Target width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Target height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Fit mode: fit, crop, or stretch (unknown modes fall back to crop behavior)
    #[arg(long)]
    mode: Option<String>,

    /// Output format (omit to infer from the asset's extension)
    #[arg(long)]
    format: Option<String>,

    /// Encoder quality 0-100 (default 100)
    #[arg(long)]
    quality: Option<u32>,

    /// Interlace setting: none, line, plane, or partition
    #[arg(long)]
    interlace: Option<String>,

    /// Crop anchor override like left-top (ignored when a focal point is given)
    #[arg(long)]
    position: Option<String>,

    /// Intrinsic width of the source asset, for the auto-sharpen heuristic
    #[arg(long)]
    asset_width: Option<u32>,

    /// Intrinsic height of the source asset
    #[arg(long)]
    asset_height: Option<u32>,

    /// Focal point x coordinate in [0,1]
    #[arg(long, requires = "focal_y")]
    focal_x: Option<f64>,

    /// Focal point y coordinate in [0,1]
    #[arg(long, requires = "focal_x")]
    focal_y: Option<f64>,
}

#[derive(Parser)]
#[command(name = "sharp-url")]
#[command(about = "Build AWS Serverless Image Handler URLs from transform requests")]
#[command(version)]
struct Cli {
    /// Deployment config file
    #[arg(long, default_value = "sharp.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the transform URL for an asset
    Url(TransformArgs),
    /// Build the webp variant URL for an asset
    WebpUrl(TransformArgs),
    /// Print a stock sharp.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Url(args) => {
            let (builder, asset, request) = prepare(&cli.config, &args)?;
            if let Some(url) = builder.transform_url(&asset, Some(&request)) {
                println!("{url}");
            }
        }
        Command::WebpUrl(args) => {
            let (builder, asset, request) = prepare(&cli.config, &args)?;
            let original = builder
                .transform_url(&asset, Some(&request))
                .unwrap_or_default();
            if let Some(url) = builder.webp_url(&original, &asset, Some(&request)) {
                println!("{url}");
            }
        }
        Command::GenConfig => {
            print!("{}", sharp_transform::config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config and turn CLI flags into builder inputs.
fn prepare(
    config_path: &std::path::Path,
    args: &TransformArgs,
) -> Result<(SharpTransform, AssetDescriptor, TransformRequest), Box<dyn std::error::Error>> {
    let config = Config::load(config_path)?;
    let builder = SharpTransform::new(config.base_url.clone(), config.settings());

    let volume: Box<dyn Volume> = match &config.bucket {
        Some(bucket) => Box::new(BucketVolume {
            bucket: bucket.clone(),
        }),
        None => Box::new(LocalVolume),
    };
    let extension = args
        .key
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_string())
        .unwrap_or_default();
    let mut asset = AssetDescriptor::new(args.key.clone(), extension).with_volume(volume.as_ref());
    asset.width = args.asset_width;
    asset.height = args.asset_height;
    if let (Some(x), Some(y)) = (args.focal_x, args.focal_y) {
        asset.focal_point = Some(FocalPoint { x, y });
    }

    let request = TransformRequest {
        format: args.format.clone(),
        quality: args.quality,
        mode: args.mode.as_deref().and_then(FitMode::parse),
        width: args.width,
        height: args.height,
        interlace: args.interlace.clone(),
        position: args.position.clone(),
    };

    Ok((builder, asset, request))
}
