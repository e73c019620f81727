use {
    crate::ComError,
    tokio::io::{AsyncReadExt, AsyncWriteExt},
};

/// Largest payload accepted when the caller has no limit of its own.
/// Fits one 1920×1080 BGRA frame with headroom.
pub const DEFAULT_MAX_FRAME_BYTES: usize = 16 * 1024 * 1024;

/// Write one length-prefixed frame.
///
/// Writes a 4-byte little-endian length, then the payload, then flushes.
pub async fn write_frame<W: AsyncWriteExt + Unpin>(
    writer: &mut W,
    payload: &[u8],
) -> Result<(), ComError> {
    let len = u32::try_from(payload.len()).map_err(|_| ComError::FrameTooLarge {
        len: payload.len() as u64,
        max: u32::MAX as usize,
    })?;

    writer.write_all(&len.to_le_bytes()).await?;
    writer.write_all(payload).await?;
    writer.flush().await?;

    Ok(())
}

/// Read one length-prefixed frame.
///
/// Reads until the whole payload has arrived, however the bytes were split
/// across reads.
///
/// Returns `ComError::ConnectionClosed` on EOF, including EOF in the middle
/// of a frame. Returns `ComError::FrameTooLarge` without reading the payload
/// if the declared length exceeds `max_len`.
pub async fn read_frame<R: AsyncReadExt + Unpin>(
    reader: &mut R,
    max_len: usize,
) -> Result<Vec<u8>, ComError> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await?;

    let len = u32::from_le_bytes(len_buf);
    if len as usize > max_len {
        return Err(ComError::FrameTooLarge {
            len: len as u64,
            max: max_len,
        });
    }

    let mut payload = vec![0u8; len as usize];
    reader.read_exact(&mut payload).await?;

    Ok(payload)
}
