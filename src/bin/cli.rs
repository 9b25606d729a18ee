use anyhow::{anyhow, bail, Context, Result};
use avatarfit::avatar::{self, AvatarBuilder, AvatarStore};
use avatarfit::background::{BackgroundRemover, FaceStore};
use avatarfit::capture::crop_and_rotate;
use avatarfit::catalog::{ProductFilter, ProductRepository};
use avatarfit::config::AvatarFitConfig;
use avatarfit::fitting::{garment_offset, render_fitting_preview, GarmentLayer};
use std::env;
use std::path::{Path, PathBuf};

const USAGE: &str = "Usage: avatarfit-cli <command> [args]

Commands:
  crop <image> <output> [--ratio <r>]
  remove-bg <photo>
  sample-color <image>
  build-avatar [--face <path>] [--template <path>] [--output <path>] [--save]
  latest-avatar [--output <path>]
  garment-offset <type>
  fitting-preview <avatar> <output> <type>=<garment image>...
  products [--brand <b>] [--type <t>] [--gender <g>] [--max-price <n>] [--json]
  cameras [--json]
  config [--init]

Global: --config <path> (default avatarfit.toml)";

#[tokio::main]
async fn main() -> Result<()> {
    avatarfit::init_logging();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    }

    let command = &args[1];
    match command.as_str() {
        "-h" | "--help" | "help" => {
            println!("{}", USAGE);
            Ok(())
        }
        "sample-color" => cmd_sample_color(&args),
        "garment-offset" => cmd_garment_offset(&args),
        "cameras" => cmd_cameras(&args),
        "config" if has_flag(&args, "--init") => cmd_config_init(&args),
        "crop" => cmd_crop(&args, &load_config(&args)?),
        "remove-bg" => cmd_remove_bg(&args, &load_config(&args)?).await,
        "build-avatar" => cmd_build_avatar(&args, &load_config(&args)?),
        "latest-avatar" => cmd_latest_avatar(&args, &load_config(&args)?),
        "fitting-preview" => cmd_fitting_preview(&args, &load_config(&args)?),
        "products" => cmd_products(&args, &load_config(&args)?).await,
        "config" => cmd_config(&load_config(&args)?),
        _ => {
            eprintln!("Unknown command: {}", command);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    }
}

/// Value following `flag`, if present
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Positional arguments after the command, skipping flags and their values
fn positionals(args: &[String]) -> Vec<&str> {
    const VALUE_FLAGS: &[&str] = &[
        "--config", "--ratio", "--face", "--template", "--output", "--brand", "--type", "--gender",
        "--max-price",
    ];
    let mut out = Vec::new();
    let mut i = 2;
    while i < args.len() {
        let arg = args[i].as_str();
        if VALUE_FLAGS.contains(&arg) {
            i += 2;
            continue;
        }
        if !arg.starts_with("--") {
            out.push(arg);
        }
        i += 1;
    }
    out
}

fn load_config(args: &[String]) -> Result<AvatarFitConfig> {
    let path = config_path(args);
    let config = AvatarFitConfig::load_layered(&path)
        .with_context(|| format!("Failed to load config from {:?}", path))?;
    config.validate().map_err(|e| anyhow!(e))?;
    Ok(config)
}

fn cmd_crop(args: &[String], config: &AvatarFitConfig) -> Result<()> {
    let pos = positionals(args);
    let (input, output) = match pos.as_slice() {
        [input, output, ..] => (*input, *output),
        _ => bail!("Usage: avatarfit-cli crop <image> <output> [--ratio <r>]"),
    };
    let ratio = match flag_value(args, "--ratio") {
        Some(r) => r.parse::<f32>().context("Invalid --ratio")?,
        None => config.camera.crop_ratio,
    };

    let frame = image::open(input).with_context(|| format!("Failed to open {}", input))?;
    let rotated = crop_and_rotate(&frame.to_rgb8(), ratio)?;
    rotated
        .save_with_format(output, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", output))?;

    println!("{}x{} -> {}", rotated.width(), rotated.height(), output);
    Ok(())
}

async fn cmd_remove_bg(args: &[String], config: &AvatarFitConfig) -> Result<()> {
    let photo = positionals(args)
        .first()
        .copied()
        .ok_or_else(|| anyhow!("Usage: avatarfit-cli remove-bg <photo>"))?;

    let remover = BackgroundRemover::new(&config.background)?;
    let store = FaceStore::from_config(&config.storage);
    let path = remover.process_photo(Path::new(photo), &store).await?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_sample_color(args: &[String]) -> Result<()> {
    let input = positionals(args)
        .first()
        .copied()
        .ok_or_else(|| anyhow!("Usage: avatarfit-cli sample-color <image>"))?;
    let color = avatar::sample_center_color_from_file(Path::new(input))?;
    println!("{}", color.to_rgba_string());
    Ok(())
}

fn cmd_build_avatar(args: &[String], config: &AvatarFitConfig) -> Result<()> {
    let face = flag_value(args, "--face")
        .map(PathBuf::from)
        .unwrap_or_else(|| config.face_path());
    let mut builder = AvatarBuilder::from_config(&config.avatar, face);
    if let Some(template) = flag_value(args, "--template") {
        builder = builder.with_template(template);
    }

    let built = builder.build()?;
    println!("color: {}", built.color_label());
    println!("recolored pixels: {}", built.recolored_pixels);
    if let Some(face) = built.face {
        println!("face: {}x{} at ({}, {})", face.width, face.height, face.x, face.y);
    }

    if let Some(output) = flag_value(args, "--output") {
        built
            .image
            .save_with_format(output, image::ImageFormat::Png)
            .with_context(|| format!("Failed to write {}", output))?;
        println!("wrote {}", output);
    }
    if has_flag(args, "--save") {
        let path = AvatarStore::from_config(&config.storage).save(&built.image)?;
        println!("saved {}", path.display());
    }
    Ok(())
}

fn cmd_latest_avatar(args: &[String], config: &AvatarFitConfig) -> Result<()> {
    let store = AvatarStore::from_config(&config.storage);
    match store.latest_path() {
        Some(path) => println!("{}", path.display()),
        None => println!("No saved avatar, using default template"),
    }

    if let Some(output) = flag_value(args, "--output") {
        let template = avatar::load_template(config.avatar.template_path.as_deref().map(Path::new))?;
        let image = store.load_latest_or(|| template);
        image
            .save_with_format(output, image::ImageFormat::Png)
            .with_context(|| format!("Failed to write {}", output))?;
    }
    Ok(())
}

fn cmd_garment_offset(args: &[String]) -> Result<()> {
    let garment_type = positionals(args)
        .first()
        .copied()
        .ok_or_else(|| anyhow!("Usage: avatarfit-cli garment-offset <type>"))?;
    println!("{}", garment_offset(garment_type));
    Ok(())
}

fn cmd_fitting_preview(args: &[String], config: &AvatarFitConfig) -> Result<()> {
    let pos = positionals(args);
    if pos.len() < 3 {
        bail!("Usage: avatarfit-cli fitting-preview <avatar> <output> <type>=<garment image>...");
    }

    let avatar_img = image::open(pos[0])
        .with_context(|| format!("Failed to open {}", pos[0]))?
        .to_rgba8();

    let mut layers = Vec::new();
    for arg in &pos[2..] {
        let (garment_type, path) = arg
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected <type>=<image>, got {}", arg))?;
        let image = image::open(path)
            .with_context(|| format!("Failed to open {}", path))?
            .to_rgba8();
        layers.push(GarmentLayer {
            garment_type: garment_type.to_string(),
            image,
        });
    }

    let (canvas, placements) = render_fitting_preview(&avatar_img, &layers, config.fitting.display_size)?;
    canvas
        .save_with_format(pos[1], image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", pos[1]))?;

    for (layer, slot) in layers.iter().zip(&placements) {
        println!(
            "{}: slot {}x{} at ({}, {}) offset {}",
            layer.garment_type, slot.size, slot.size, slot.x, slot.y, slot.offset
        );
    }
    Ok(())
}

async fn cmd_products(args: &[String], config: &AvatarFitConfig) -> Result<()> {
    let filter = ProductFilter {
        brand: flag_value(args, "--brand").map(str::to_string),
        product_type: flag_value(args, "--type").map(str::to_string),
        gender: flag_value(args, "--gender").map(str::to_string),
        max_price: flag_value(args, "--max-price")
            .map(|p| p.parse::<i64>())
            .transpose()
            .context("Invalid --max-price")?,
    };

    let repo = ProductRepository::new(&config.catalog)?;
    let products = repo.get_filtered_products(&filter).await?;

    if has_flag(args, "--json") {
        println!("{}", serde_json::to_string(&products)?);
    } else {
        for p in products {
            println!(
                "{} | {} | {} | {}",
                p.brand.as_deref().unwrap_or("-"),
                p.name.as_deref().unwrap_or("-"),
                p.product_type.as_deref().unwrap_or("-"),
                p.price.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
            );
        }
    }
    Ok(())
}

fn cmd_cameras(args: &[String]) -> Result<()> {
    let cameras = avatarfit::camera::list_cameras()?;
    if has_flag(args, "--json") {
        println!("{}", serde_json::to_string(&cameras)?);
    } else {
        for c in cameras {
            println!("{}: {}", c.id, c.name);
        }
    }
    Ok(())
}

fn config_path(args: &[String]) -> PathBuf {
    flag_value(args, "--config")
        .map(PathBuf::from)
        .unwrap_or_else(AvatarFitConfig::default_path)
}

/// Write a default config file, replacing an invalid one
fn cmd_config_init(args: &[String]) -> Result<()> {
    let path = config_path(args);
    AvatarFitConfig::default().save_to_file(&path)?;
    println!("wrote {}", path.display());
    Ok(())
}

fn cmd_config(config: &AvatarFitConfig) -> Result<()> {
    // Never echo the API key
    let mut shown = config.clone();
    if !shown.background.api_key.is_empty() {
        shown.background.api_key = "***".to_string();
    }
    println!("{}", toml::to_string_pretty(&shown)?);
    Ok(())
}
