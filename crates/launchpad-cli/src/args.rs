//! CLI argument parsing with clap derive macros.

use clap::{Parser, Subcommand, ValueEnum};
use launchpad_core::color::{Color, Hue};

/// Drive a Launchpad from the command line.
///
/// Outbound commands are printed as hex messages, one per line, ready to be
/// piped into a MIDI sender. Inbound messages are read as hex and printed
/// as JSON key events.
#[derive(Debug, Parser)]
#[command(name = "lpad", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decode row/column patterns into coordinates
    #[command(after_help = "\
Patterns:
  rN<sel>   row N (y = N)             cN<sel>   column N (x = N)
  am<sel>   automap row (y = 8)       sc<sel>   scene column (x = 8)

In <sel>, 'x' or 'X' selects and anything else is a placeholder. The first
character is the round button (index 8), then buttons 0..7.

Examples:
  lpad pattern r3x.x                    # (8,3) and (1,3)
  lpad pattern am.xx r0.x               # several patterns, sorted and merged")]
    Pattern(PatternArgs),

    /// Decode a 9x9 painting into coordinates
    Map(MapArgs),

    /// Print the colour byte for a palette colour
    #[command(after_help = "\
Examples:
  lpad color red                        # 3
  lpad color green --level 1            # 16
  lpad color amber --copy               # 55")]
    Color(ColorArgs),

    /// Set the buttons selected by patterns to one colour
    #[command(after_help = "\
Examples:
  lpad paint red r0.xxxxxxxx            # whole first row
  lpad paint amber --level 1 sc.x am.x  # two round buttons, dimmed")]
    Paint(PaintArgs),

    /// Select write/display buffers and flashing
    Buffers(BuffersArgs),

    /// Set the low/medium brightness duty cycle directly
    Multiplex(MultiplexArgs),

    /// Set the low/medium brightness from a fraction between 0 and 1
    Brightness(BrightnessArgs),

    /// Reset the device, optionally lighting every LED
    Reset(ResetArgs),

    /// List the achievable duty cycles
    DutyCycles,

    /// Decode inbound messages given as hex
    #[command(after_help = "\
Examples:
  lpad decode 90237f                    # grid (3,2) pressed
  lpad decode 'b0 6a 00'                # automap button 2 released")]
    Decode(DecodeArgs),

    /// Read inbound hex messages from stdin and print key events
    Monitor,

    /// Print the given MIDI port names that belong to the device
    #[command(after_help = "\
The keyword defaults to 'Launchpad' and can be changed with LAUNCHPAD_PORT.

Examples:
  lpad ports 'Midi Through Port-0' 'Launchpad S MIDI 1'")]
    Ports(PortsArgs),

    /// Show an end-to-end usage example
    Examples,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HueArg {
    Red,
    Green,
    Amber,
    Yellow,
    Off,
}

impl From<HueArg> for Hue {
    fn from(hue: HueArg) -> Self {
        match hue {
            HueArg::Red => Hue::Red,
            HueArg::Green => Hue::Green,
            HueArg::Amber => Hue::Amber,
            HueArg::Yellow => Hue::Yellow,
            HueArg::Off => Hue::Off,
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct ColorSpec {
    /// Palette colour
    #[arg(value_enum)]
    pub hue: HueArg,

    /// Brightness level, 0 (off) to 3 (full)
    #[arg(short, long, default_value_t = 3.0)]
    pub level: f64,

    /// Turn the LED off in the other buffer
    #[arg(long)]
    pub clear: bool,

    /// Write the same colour to the other buffer (honoured over --clear)
    #[arg(long)]
    pub copy: bool,
}

impl ColorSpec {
    pub fn to_color(&self) -> Color {
        let mut color = Color::new(self.hue.into()).with_level(self.level);
        if self.clear {
            color = color.clearing_other();
        }
        if self.copy {
            color = color.copying_other();
        }
        color
    }
}

#[derive(Debug, clap::Args)]
pub struct PatternArgs {
    /// One or more patterns (e.g. r3x.x, sc.xx, am..x)
    #[arg(required = true, num_args = 1..)]
    pub patterns: Vec<String>,
}

#[derive(Debug, clap::Args)]
pub struct MapArgs {
    /// 81 characters, row by row from the top; lowercase 'x' selects
    pub map: String,
}

#[derive(Debug, clap::Args)]
pub struct ColorArgs {
    #[command(flatten)]
    pub color: ColorSpec,
}

#[derive(Debug, clap::Args)]
pub struct PaintArgs {
    #[command(flatten)]
    pub color: ColorSpec,

    /// Patterns selecting the buttons to paint
    #[arg(required = true, num_args = 1..)]
    pub patterns: Vec<String>,
}

#[derive(Debug, clap::Args)]
pub struct BuffersArgs {
    /// Buffer that LED writes go to (0 or 1)
    #[arg(short, long)]
    pub write: Option<u8>,

    /// Buffer that is shown (0 or 1)
    #[arg(short, long)]
    pub display: Option<u8>,

    /// Alternate between the buffers
    #[arg(short, long)]
    pub flash: Option<bool>,

    /// Copy the displayed buffer into the other one
    #[arg(long)]
    pub copy_to_display: bool,
}

#[derive(Debug, clap::Args)]
pub struct MultiplexArgs {
    /// Numerator, 1 to 16 [default: 1]
    pub numerator: Option<u8>,

    /// Denominator, 3 to 18 [default: 5]
    pub denominator: Option<u8>,
}

#[derive(Debug, clap::Args)]
pub struct BrightnessArgs {
    /// 0.0 (dark) to 1.0 (bright)
    pub brightness: f64,
}

#[derive(Debug, clap::Args)]
pub struct ResetArgs {
    /// Light every LED at this level (1 to 3) instead of turning them off
    #[arg(short, long)]
    pub brightness: Option<u8>,
}

#[derive(Debug, clap::Args)]
pub struct DecodeArgs {
    /// Messages as hex, e.g. 90237f or "90 23 7f"
    #[arg(required = true, num_args = 1..)]
    pub messages: Vec<String>,
}

#[derive(Debug, clap::Args)]
pub struct PortsArgs {
    /// Port names as listed by the MIDI system
    #[arg(required = true, num_args = 1..)]
    pub names: Vec<String>,
}

/// End-to-end example text for the `examples` command.
pub const EXAMPLES_TEXT: &str = r#"End-to-end example: light a row and react to presses

lpad prints outbound messages as hex lines and reads inbound ones from
stdin, so it can sit between any MIDI tool that speaks raw bytes.

# 1. Reset the device and dim the low/medium levels
lpad reset
lpad brightness 0.3

# 2. Paint the top automap row amber and the first grid row red
lpad paint amber am.xxxxxxxx
lpad paint red r0.xxxxxxxx

# 3. Draw into buffer 1 while showing buffer 0, then flash between them
lpad buffers --write 1 --display 0
lpad paint green --copy c3.xxxxxxxx
lpad buffers --flash true

# 4. Watch key presses (pipe raw device bytes as hex, one message per line)
amidi -p hw:1 -d | lpad monitor
"#;
