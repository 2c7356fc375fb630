//! Info command implementation
//!
//! Lists font families, seal styles and output formats.

use crate::cli::InfoArgs;
use dojang_core::{
    error::Result,
    types::{BorderStyle, FontFamily, LayoutPolicy, OutputFormat, SealShape},
};
use dojang_fontdb::FontLibrary;

pub fn run(args: &InfoArgs) -> Result<()> {
    // If no specific flags, show all info
    let show_all = !args.fonts && !args.styles && !args.formats;

    println!("Dojang v{}", env!("CARGO_PKG_VERSION"));
    println!();

    if show_all || args.fonts {
        print_fonts(args)?;
        if show_all {
            println!();
        }
    }

    if show_all || args.styles {
        print_styles();
        if show_all {
            println!();
        }
    }

    if show_all || args.formats {
        print_formats();
    }

    Ok(())
}

fn print_fonts(args: &InfoArgs) -> Result<()> {
    let found = match &args.font_dir {
        Some(dir) => {
            let library = FontLibrary::new();
            library.discover(dir)?;
            Some(library.families())
        },
        None => None,
    };

    println!("Font families:");
    for family in FontFamily::ALL {
        let names = family.candidate_names().join(", ");
        let status = match &found {
            Some(found) if found.contains(&family) => "  [found]",
            Some(_) => "  [missing]",
            None => "",
        };
        println!("  {:<16}  {names}{status}", family.as_str());
    }
    Ok(())
}

fn print_styles() {
    let shapes = [
        SealShape::Circle,
        SealShape::Oval,
        SealShape::Square,
        SealShape::Rectangle,
    ];
    let layouts = [
        LayoutPolicy::Vertical,
        LayoutPolicy::Horizontal,
        LayoutPolicy::Centered,
        LayoutPolicy::VerticalRight,
        LayoutPolicy::VerticalLeft,
    ];
    let borders = [BorderStyle::Flat, BorderStyle::Textured, BorderStyle::Rough];

    println!("Shapes:");
    for shape in shapes {
        println!("  {}", shape.as_str());
    }
    println!("Layouts:");
    for layout in layouts {
        println!("  {}", layout.as_str());
    }
    println!("Border styles:");
    for border in borders {
        println!("  {}", border.as_str());
    }
}

fn print_formats() {
    println!("Output formats:");
    for format in [OutputFormat::Jpeg, OutputFormat::Png] {
        let note = if format.is_opaque() {
            "white background, quality 95 (trademarks 100)"
        } else {
            "transparent background"
        };
        println!("  {:<16}  {note}", format.extension());
    }
}
