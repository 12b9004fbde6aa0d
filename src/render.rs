use crate::config::AppConfig;
use crate::types::MapCountry;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;

// One interactive shape per country, identified by country name, drawn in
// list order (later paths sit on top). Producer countries carry their taste
// summary as a <title> child, the SVG-native tooltip.
pub fn render_svg(countries: &[MapCountry], surface_size: (f64, f64)) -> String {
    let (width, height) = surface_size;

    let mut svg = String::new();
    write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )
    .expect("write to string");
    svg.push('\n');

    for country in countries {
        write!(
            svg,
            r#"  <path id="{}" d="{}" fill="{}" stroke="{}""#,
            xml_escape(&country.country_name),
            country.svg.d,
            country.svg.fill,
            country.svg.stroke,
        )
        .expect("write to string");

        match &country.taste_profile {
            Some(profile) => {
                write!(svg, "><title>{}</title></path>", xml_escape(&profile.summary))
                    .expect("write to string");
            }
            None => svg.push_str("/>"),
        }
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

pub fn write_svg(config: &AppConfig, countries: &[MapCountry]) -> Result<()> {
    let svg = render_svg(countries, config.map.surface_size());

    if let Some(parent) = config.output.svg_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
        }
    }

    fs::write(&config.output.svg_path, svg)
        .with_context(|| format!("Failed to write SVG: {:?}", config.output.svg_path))?;

    println!("Wrote map to {:?}", config.output.svg_path);
    Ok(())
}

fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
