use crate::convert::RendererKind;
use crate::io::PdfToHtml;
use crate::types::{FormatProfile, Layout};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Convert a bank statement PDF into CSV transaction rows
#[derive(Parser, Debug)]
#[command(name = "statement-csv")]
#[command(about = "Convert a bank statement PDF into CSV transaction rows", long_about = None)]
pub struct CliArgs {
    /// Statement file (PDF, or rendered text with --pre-rendered)
    #[arg(value_name = "INPUT", help = "Path to the source statement PDF")]
    pub input_file: PathBuf,

    /// Statement layout to parse
    #[arg(
        long = "layout",
        value_name = "LAYOUT",
        default_value = "checking",
        help = "Statement layout: 'card' for card activity or 'checking' for checking detail"
    )]
    pub layout: LayoutArg,

    /// Year stamped onto the statement's MM/DD dates
    #[arg(
        long = "year",
        value_name = "YYYY",
        help = "Statement year (default: the layout's configured year)"
    )]
    pub year: Option<i32>,

    /// Output CSV path, overwritten on every run
    #[arg(
        long = "output",
        short = 'o',
        value_name = "PATH",
        default_value = "output.csv"
    )]
    pub output_file: PathBuf,

    /// Printed account-holder name that ends a transaction section
    #[arg(long = "holder", value_name = "NAME")]
    pub holder: Option<String>,

    /// PDF-to-HTML renderer program
    #[arg(
        long = "renderer",
        value_name = "PROGRAM",
        default_value = PdfToHtml::DEFAULT_PROGRAM,
        conflicts_with = "pre_rendered"
    )]
    pub renderer: String,

    /// Treat INPUT as already-rendered text instead of running the renderer
    #[arg(long = "pre-rendered")]
    pub pre_rendered: bool,
}

/// Layouts selectable on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Card,
    Checking,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Card => Layout::CardActivity,
            LayoutArg::Checking => Layout::CheckingDetail,
        }
    }
}

impl CliArgs {
    /// Build the parser profile from the layout defaults and any overrides
    pub fn to_profile(&self) -> FormatProfile {
        let mut profile = FormatProfile::for_layout(self.layout.into());
        if let Some(year) = self.year {
            profile = profile.with_year(year);
        }
        if let Some(holder) = &self.holder {
            profile = profile.with_holder(holder);
        }
        profile
    }

    pub fn renderer_kind(&self) -> RendererKind {
        if self.pre_rendered {
            RendererKind::PreRendered
        } else {
            RendererKind::Program(self.renderer.clone())
        }
    }
}
