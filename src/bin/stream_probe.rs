use rallymedia::frames::{scan_bytestream, NalKind};
use std::env;
use std::fs;

fn main() {
    println!("🔍 H.264 Stream Probe - Annex B Structure Analysis");
    println!("==================================================");

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: stream_probe <clip.h264> [frame_rate]");
        println!("Example: stream_probe demos/rally.h264 30");
        return;
    }
    let file_path = &args[1];
    let frame_rate: f64 = args.get(2).and_then(|v| v.parse().ok()).unwrap_or(30.0);

    match probe_stream(file_path, frame_rate) {
        Ok(_) => println!("\n✅ Probe completed successfully"),
        Err(e) => println!("\n❌ Probe failed: {}", e),
    }
}

fn probe_stream(path: &str, frame_rate: f64) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(path)?;

    println!("📄 File: {}", path);
    println!("📏 Size: {} bytes", data.len());
    println!();

    let units = scan_bytestream(&data);
    let mut slices = 0usize;
    let mut parameter_sets = 0usize;

    for (i, unit) in units.iter().enumerate() {
        println!("  [{:3}] {} ({} bytes)", i, unit.kind, unit.data.len());
        match unit.kind {
            NalKind::Sps | NalKind::Pps => parameter_sets += 1,
            kind if kind.is_slice() => slices += 1,
            _ => {}
        }
    }

    println!();
    println!("NAL units: {}", units.len());
    println!("Parameter sets: {}", parameter_sets);
    println!("Video frames: {}", slices);
    if slices > 0 {
        println!(
            "Duration at {:.2} fps: {:.3}s",
            frame_rate,
            slices as f64 / frame_rate
        );
    }
    if parameter_sets == 0 {
        println!("⚠ No SPS/PPS found - this stream cannot be opened for sampling");
    }

    Ok(())
}
