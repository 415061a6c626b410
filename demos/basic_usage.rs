//! Basic usage example for promptcloud
//!
//! This example demonstrates the offline building blocks:
//! - Synthesizing placeholder shapes
//! - Decoding the JSON point format
//! - Building the scatter trace handed to the plotting library

use promptcloud_core::{generate, Drawable, Instruction, Shape};
use promptcloud_io::{parse_points, PointsExt};
use promptcloud_visualization::{MarkerStyle, PlotLayout, ScatterTrace};

fn main() -> anyhow::Result<()> {
    println!("promptcloud Basic Usage Example");
    println!("===============================");

    // Synthesize each placeholder shape
    println!("\nSynthesizer:");
    for shape in Shape::ALL {
        let cloud = generate(shape, 500);
        let (min, max) = cloud.bounding_box();
        println!(
            "- {} (slot {}): {} points, bounds [{:.2}, {:.2}, {:.2}] .. [{:.2}, {:.2}, {:.2}]",
            shape,
            shape.slot(),
            cloud.len(),
            min.x,
            min.y,
            min.z,
            max.x,
            max.y,
            max.z
        );
    }

    // Instructions are trimmed and validated before anything is sent
    println!("\nInstructions:");
    let instruction = Instruction::parse("  pick up the red cube ")?;
    println!("- parsed: {:?}", instruction.as_str());
    match Instruction::parse("   ") {
        Ok(_) => println!("- whitespace accepted (unexpected)"),
        Err(e) => println!("- whitespace rejected: {}", e),
    }

    // Decode a response payload with and without colors
    println!("\nPoint format:");
    let cloud = parse_points(br#"[[0, 0, 0, 255, 0, 0], [1, 1, 1, 0, 0, 255]]"#)?;
    println!("- decoded {} colored points, fully colored: {}", cloud.len(), cloud.is_fully_colored());
    println!("- re-encoded: {}", cloud.to_json()?);

    // Build the plot payload
    println!("\nScatter trace:");
    let trace = ScatterTrace::from_cloud(&cloud, &MarkerStyle::default());
    let payload = serde_json::json!({
        "data": [trace],
        "layout": PlotLayout::default(),
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);

    let torus = generate(Shape::Torus, 200).into_colored();
    let trace = ScatterTrace::from_cloud(&torus, &MarkerStyle::default());
    println!("\nUncolored torus uses the {:?} color scale", trace.marker.colorscale);

    println!("\nExample completed successfully!");
    Ok(())
}
