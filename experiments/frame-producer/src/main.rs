use base::log;
use com::Client;
use image::{Frame, decode_encoded, encode_jpeg, frame_to_bgra};
use std::env;
use std::time::{Duration, Instant};

const DEFAULT_ADDR: &str = "127.0.0.1:12345";
const REPLY_TIMEOUT: Duration = Duration::from_secs(10);

/// Usage: frame-producer [--raw] [IMAGE...]
///
/// Sends each image to the bridge at `HANDBRIDGE_ADDR` and prints the reply.
/// With `--raw` the images are decoded here and sent as BGRA pixels, for a
/// bridge configured with a matching raw mode. Without images, one black
/// 640x480 JPEG is sent.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    base::init_stdout_logger();

    let addr = env::var("HANDBRIDGE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let mut raw = false;
    let mut paths = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--raw" => raw = true,
            _ => paths.push(arg),
        }
    }

    let mut payloads = Vec::new();
    for path in &paths {
        let bytes = std::fs::read(path)?;
        let payload = if raw {
            frame_to_bgra(&decode_encoded(&bytes)?)
        } else {
            bytes
        };
        payloads.push((path.clone(), payload));
    }
    if payloads.is_empty() {
        let black = Frame::filled(640, 480, [0, 0, 0])?;
        let payload = if raw {
            frame_to_bgra(&black)
        } else {
            encode_jpeg(&black, 90)?
        };
        payloads.push(("black 640x480".to_string(), payload));
    }

    log::info!("Connecting to {}", addr);
    let mut client = Client::connect(addr.as_str()).await?;

    for (name, payload) in &payloads {
        let start = Instant::now();
        client.send_frame(payload).await?;
        let reply = client.recv_reply_timeout(REPLY_TIMEOUT).await?;
        log::info!(
            "{}: {} bytes sent, {} byte reply in {:?}",
            name,
            payload.len(),
            reply.len(),
            start.elapsed()
        );
        println!("{}", String::from_utf8_lossy(&reply));
    }

    Ok(())
}
