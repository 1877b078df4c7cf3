use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context as _;
use clap::Parser;

use memely::{BottomMode, CaptionSession, CaptionSpec, OutputFormat, Rgb};

#[derive(Parser, Debug)]
#[command(name = "memely", version, about = "Add captions to images")]
struct Cli {
    /// Path to the source image (JPEG, PNG, or GIF).
    img: PathBuf,

    /// Caption text placed above the image (use \n for new lines).
    text: String,

    /// Custom output filename (without extension).
    #[arg(short = 'f', long)]
    filename: Option<String>,

    /// Path to a font file; defaults to a known system font.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Top text color as R,G,B or R G B.
    #[arg(long)]
    top_font_color: Option<String>,

    /// Top background color as R,G,B or R G B.
    #[arg(long)]
    top_bg_color: Option<String>,

    /// Text to place at the bottom of the image.
    #[arg(long)]
    bottom_text: Option<String>,

    /// Overlay bottom text directly on the image instead of a boxed strip.
    #[arg(long)]
    no_bottom_text_box: bool,

    /// Bottom text color as R,G,B or R G B.
    #[arg(long)]
    bottom_font_color: Option<String>,

    /// Bottom background color as R,G,B or R G B.
    #[arg(long)]
    bottom_bg_color: Option<String>,

    /// Draw a line separating the caption from the image.
    #[arg(long)]
    separator_line: bool,

    /// Separator line color as R,G,B or R G B.
    #[arg(long, default_value = "0,0,0")]
    separator_color: String,

    /// Render captions bold.
    #[arg(long)]
    bold: bool,

    /// Render captions italic.
    #[arg(long)]
    italic: bool,

    /// Compress the output to at most this many bytes.
    #[arg(long)]
    max_bytes: Option<u64>,

    /// Output format for static sources (animated GIF always emits gif).
    #[arg(long, value_parser = parse_format)]
    format: Option<OutputFormat>,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_ascii_lowercase().as_str() {
        "png" => Ok(OutputFormat::Png),
        "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
        "gif" => Ok(OutputFormat::Gif),
        other => Err(format!("unknown format '{other}' (expected png, jpg, or gif)")),
    }
}

fn parse_color(s: &str) -> anyhow::Result<Rgb> {
    Rgb::parse(s).map_err(|e| anyhow::anyhow!("{e}"))
}

fn default_file_name() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("meme-{secs}")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let source = fs::read(&cli.img)
        .with_context(|| format!("read source image '{}'", cli.img.display()))?;

    let mut spec = CaptionSpec::new(cli.text);
    if let Some(bottom) = cli.bottom_text {
        spec = spec.with_bottom_text(bottom);
    }
    if cli.no_bottom_text_box {
        spec = spec.with_bottom_mode(BottomMode::Overlay);
    }
    spec = spec.with_style(cli.bold, cli.italic);
    if let Some(c) = &cli.top_font_color {
        spec.top_font_color = parse_color(c)?;
    }
    if let Some(c) = &cli.bottom_font_color {
        spec.bottom_font_color = parse_color(c)?;
    }
    if let Some(c) = &cli.top_bg_color {
        spec.top_background = Some(parse_color(c)?);
    }
    if let Some(c) = &cli.bottom_bg_color {
        spec.bottom_background = Some(parse_color(c)?);
    }
    if cli.separator_line {
        spec = spec.with_separator(parse_color(&cli.separator_color)?);
    }

    let mut session = CaptionSession::new(spec);
    if let Some(font_path) = &cli.font {
        let bytes = fs::read(font_path)
            .with_context(|| format!("read font '{}'", font_path.display()))?;
        session = session.with_font_bytes(bytes);
    }
    if let Some(format) = cli.format {
        session = session.with_output_format(format);
    }
    if let Some(budget) = cli.max_bytes {
        session = session.with_byte_budget(budget);
    }

    let output = session.caption_bytes(&source)?;

    let name = cli.filename.unwrap_or_else(default_file_name);
    let path = format!("{name}.{}", output.format.extension());
    fs::write(&path, &output.bytes).with_context(|| format!("write output '{path}'"))?;

    if let Some(budget) = cli.max_bytes
        && output.bytes.len() as u64 > budget
    {
        eprintln!(
            "warning: best effort {} bytes exceeds requested budget {budget}",
            output.bytes.len()
        );
    }
    println!("Caption saved to {path}");
    Ok(())
}
