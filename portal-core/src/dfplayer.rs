//! Serielles Frame-Format des DFPlayer Mini
//!
//! Jeder Befehl ist genau 10 Bytes lang:
//!
//! ```text
//! 7E FF 06 CMD FB PH PL CH CL EF
//! ```
//!
//! `FB` = Feedback gewünscht (0/1), `P` = 16-Bit Parameter (big endian),
//! `C` = Checksumme, das Zweierkomplement der Summe von `FF` bis `PL`.

pub const FRAME_LEN: usize = 10;

const START: u8 = 0x7E;
const VERSION: u8 = 0xFF;
const LENGTH: u8 = 0x06;
const END: u8 = 0xEF;

/// Maximale Lautstärke des Moduls
pub const MAX_VOLUME: u8 = 30;

/// Unterstützte Befehle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    PlayTrack = 0x03,
    SetVolume = 0x06,
    Reset = 0x0C,
    QueryStatus = 0x42,
}

/// Antwort des Moduls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    pub command: u8,
    pub param: u16,
}

fn checksum(body: &[u8]) -> u16 {
    let sum = body.iter().fold(0u16, |acc, b| acc.wrapping_add(u16::from(*b)));
    0u16.wrapping_sub(sum)
}

/// Baut einen Befehls-Frame
pub fn encode(command: Command, param: u16, feedback: bool) -> [u8; FRAME_LEN] {
    let [ph, pl] = param.to_be_bytes();
    let mut frame = [
        START,
        VERSION,
        LENGTH,
        command as u8,
        u8::from(feedback),
        ph,
        pl,
        0,
        0,
        END,
    ];
    let [ch, cl] = checksum(&frame[1..7]).to_be_bytes();
    frame[7] = ch;
    frame[8] = cl;
    frame
}

/// Befehl zum Abspielen von Track `number` (1-basiert)
pub fn play_track(number: u16) -> [u8; FRAME_LEN] {
    encode(Command::PlayTrack, number, false)
}

/// Lautstärke setzen, Werte über 30 werden begrenzt
pub fn set_volume(volume: u8) -> [u8; FRAME_LEN] {
    encode(Command::SetVolume, u16::from(volume.min(MAX_VOLUME)), false)
}

/// Prüft einen empfangenen Frame (Rahmen + Checksumme)
pub fn decode(frame: &[u8]) -> Option<Reply> {
    if frame.len() != FRAME_LEN
        || frame[0] != START
        || frame[1] != VERSION
        || frame[2] != LENGTH
        || frame[9] != END
    {
        return None;
    }
    let expected = u16::from_be_bytes([frame[7], frame[8]]);
    if checksum(&frame[1..7]) != expected {
        return None;
    }
    Some(Reply {
        command: frame[3],
        param: u16::from_be_bytes([frame[5], frame[6]]),
    })
}

/// Sucht den ersten gültigen Frame in einem Empfangspuffer
///
/// Der Puffer kann mit Rauschen oder einem abgeschnittenen Frame beginnen.
pub fn find_reply(buffer: &[u8]) -> Option<Reply> {
    buffer.windows(FRAME_LEN).find_map(decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_track_one_reference_frame() {
        assert_eq!(
            play_track(1),
            [0x7E, 0xFF, 0x06, 0x03, 0x00, 0x00, 0x01, 0xFE, 0xF7, 0xEF]
        );
    }

    #[test]
    fn test_volume_is_clamped() {
        let frame = set_volume(99);
        assert_eq!(frame[6], MAX_VOLUME);
        assert_eq!(frame[3], 0x06);
    }

    #[test]
    fn test_decode_rejects_bad_checksum() {
        let mut frame = play_track(2);
        frame[8] ^= 0x01;
        assert_eq!(decode(&frame), None);
    }

    #[test]
    fn test_find_reply_skips_noise() {
        let reply = encode(Command::QueryStatus, 0x0200, false);
        let mut buffer = [0u8; 14];
        buffer[0] = 0x00;
        buffer[1] = 0x7E;
        buffer[2] = 0x13;
        buffer[4..].copy_from_slice(&reply);
        assert_eq!(
            find_reply(&buffer),
            Some(Reply {
                command: 0x42,
                param: 0x0200
            })
        );
    }

    #[test]
    fn test_find_reply_short_buffer() {
        assert_eq!(find_reply(&[0x7E, 0xFF]), None);
    }
}
