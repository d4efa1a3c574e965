//! An embedded picture, stored as the value of a byte attribute named
//! [`WM_PICTURE`](crate::WM_PICTURE):
//!
//! ```md
//! picture
//! ├─ 1 byte picture type
//! ├─ 4 bytes picture data length
//! ├─ mime type (utf-16le, null terminated)
//! ├─ description (utf-16le, null terminated)
//! └─ picture data
//! ```
use std::fmt;

use crate::util::{decode_wstring, render_wstring};

// Picture type codes, shared with the attached picture frame of id3v2.
const OTHER: u8 = 0;
const FILE_ICON: u8 = 1;
const OTHER_FILE_ICON: u8 = 2;
const FRONT_COVER: u8 = 3;
const BACK_COVER: u8 = 4;
const LEAFLET_PAGE: u8 = 5;
const MEDIA: u8 = 6;
const LEAD_ARTIST: u8 = 7;
const ARTIST: u8 = 8;
const CONDUCTOR: u8 = 9;
const BAND: u8 = 10;
const COMPOSER: u8 = 11;
const LYRICIST: u8 = 12;
const RECORDING_LOCATION: u8 = 13;
const DURING_RECORDING: u8 = 14;
const DURING_PERFORMANCE: u8 = 15;
const MOVIE_SCREEN_CAPTURE: u8 = 16;
const COLOURED_FISH: u8 = 17;
const ILLUSTRATION: u8 = 18;
const BAND_LOGO: u8 = 19;
const PUBLISHER_LOGO: u8 = 20;

/// An enum describing what a picture depicts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PictureType {
    /// A picture of something else.
    Other,
    /// A 32x32 pixel png file icon.
    FileIcon,
    /// An icon of a different kind or size.
    OtherFileIcon,
    /// The front cover of the release.
    FrontCover,
    /// The back cover of the release.
    BackCover,
    /// A leaflet page.
    LeafletPage,
    /// A picture of the physical medium, e.g. the label side of a cd.
    Media,
    /// A picture of the lead artist, lead performer or soloist.
    LeadArtist,
    /// A picture of an artist or performer.
    Artist,
    /// A picture of the conductor.
    Conductor,
    /// A picture of the band or orchestra.
    Band,
    /// A picture of the composer.
    Composer,
    /// A picture of the lyricist or text writer.
    Lyricist,
    /// A picture of the recording location or studio.
    RecordingLocation,
    /// A picture taken during the recording.
    DuringRecording,
    /// A picture taken during the performance.
    DuringPerformance,
    /// A capture from a movie or video screen.
    MovieScreenCapture,
    /// A brightly coloured fish.
    ColouredFish,
    /// An illustration related to the track.
    Illustration,
    /// The logotype of the band or artist.
    BandLogo,
    /// The logotype of the publisher or studio.
    PublisherLogo,
}

impl PictureType {
    /// Returns the picture type corresponding to the code, if it is defined.
    pub fn from(code: u8) -> Option<Self> {
        match code {
            OTHER => Some(Self::Other),
            FILE_ICON => Some(Self::FileIcon),
            OTHER_FILE_ICON => Some(Self::OtherFileIcon),
            FRONT_COVER => Some(Self::FrontCover),
            BACK_COVER => Some(Self::BackCover),
            LEAFLET_PAGE => Some(Self::LeafletPage),
            MEDIA => Some(Self::Media),
            LEAD_ARTIST => Some(Self::LeadArtist),
            ARTIST => Some(Self::Artist),
            CONDUCTOR => Some(Self::Conductor),
            BAND => Some(Self::Band),
            COMPOSER => Some(Self::Composer),
            LYRICIST => Some(Self::Lyricist),
            RECORDING_LOCATION => Some(Self::RecordingLocation),
            DURING_RECORDING => Some(Self::DuringRecording),
            DURING_PERFORMANCE => Some(Self::DuringPerformance),
            MOVIE_SCREEN_CAPTURE => Some(Self::MovieScreenCapture),
            COLOURED_FISH => Some(Self::ColouredFish),
            ILLUSTRATION => Some(Self::Illustration),
            BAND_LOGO => Some(Self::BandLogo),
            PUBLISHER_LOGO => Some(Self::PublisherLogo),
            _ => None,
        }
    }

    /// Returns the integer code of the picture type.
    pub fn value(&self) -> u8 {
        match self {
            Self::Other => OTHER,
            Self::FileIcon => FILE_ICON,
            Self::OtherFileIcon => OTHER_FILE_ICON,
            Self::FrontCover => FRONT_COVER,
            Self::BackCover => BACK_COVER,
            Self::LeafletPage => LEAFLET_PAGE,
            Self::Media => MEDIA,
            Self::LeadArtist => LEAD_ARTIST,
            Self::Artist => ARTIST,
            Self::Conductor => CONDUCTOR,
            Self::Band => BAND,
            Self::Composer => COMPOSER,
            Self::Lyricist => LYRICIST,
            Self::RecordingLocation => RECORDING_LOCATION,
            Self::DuringRecording => DURING_RECORDING,
            Self::DuringPerformance => DURING_PERFORMANCE,
            Self::MovieScreenCapture => MOVIE_SCREEN_CAPTURE,
            Self::ColouredFish => COLOURED_FISH,
            Self::Illustration => ILLUSTRATION,
            Self::BandLogo => BAND_LOGO,
            Self::PublisherLogo => PUBLISHER_LOGO,
        }
    }
}

/// A struct representing an embedded picture, containing the image data and
/// information about what it depicts.
#[derive(Clone, Eq, PartialEq)]
pub struct Picture {
    /// The picture type code, see [`PictureType`].
    pub pic_type: u8,
    /// The mime type of the image data.
    pub mime_type: String,
    /// A description of the picture.
    pub description: String,
    /// The image data.
    pub data: Vec<u8>,
}

impl fmt::Debug for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Picture")
            .field("pic_type", &self.pic_type)
            .field("mime_type", &self.mime_type)
            .field("description", &self.description)
            .field("data", &format_args!("[{} bytes]", self.data.len()))
            .finish()
    }
}

impl Picture {
    /// Creates a picture with the type, mime type, description and image
    /// data.
    pub fn new(
        pic_type: PictureType,
        mime_type: impl Into<String>,
        description: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            pic_type: pic_type.value(),
            mime_type: mime_type.into(),
            description: description.into(),
            data,
        }
    }

    /// Returns the picture type, if the stored code is defined.
    pub fn picture_type(&self) -> Option<PictureType> {
        PictureType::from(self.pic_type)
    }

    /// Attempts to parse a picture from the byte block. Returns `None` if the
    /// block is too short, a string terminator is missing, the declared data
    /// length doesn't match the remaining bytes, or a string is not valid
    /// utf-16.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 9 {
            return None;
        }

        let pic_type = bytes[0];
        let data_len = u32::from_le_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]) as usize;

        let mut pos = 5;
        let end = find_wchar_null(bytes, pos)?;
        let mime_type = decode_wstring(&bytes[pos..end]).ok()?;

        pos = end + 2;
        let end = find_wchar_null(bytes, pos)?;
        let description = decode_wstring(&bytes[pos..end]).ok()?;

        pos = end + 2;
        if pos + data_len != bytes.len() {
            return None;
        }

        Some(Self { pic_type, mime_type, description, data: bytes[pos..].to_vec() })
    }

    /// Renders the picture to its byte representation.
    pub fn render(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.data_size() as usize);

        data.push(self.pic_type);
        data.extend_from_slice(&(self.data.len() as u32).to_le_bytes());
        data.extend(render_wstring(&self.mime_type, false));
        data.extend(render_wstring(&self.description, false));
        data.extend_from_slice(&self.data);

        data
    }

    /// Returns the length of the byte representation in bytes.
    pub fn data_size(&self) -> u64 {
        let mime_len = self.mime_type.encode_utf16().count() as u64;
        let description_len = self.description.encode_utf16().count() as u64;

        9 + (mime_len + description_len) * 2 + self.data.len() as u64
    }
}

/// Returns the position of the first null utf-16 code unit at or after `pos`,
/// searching at 2 byte alignment.
fn find_wchar_null(bytes: &[u8], mut pos: usize) -> Option<usize> {
    while pos + 1 < bytes.len() {
        if bytes[pos] == 0 && bytes[pos + 1] == 0 {
            return Some(pos);
        }
        pos += 2;
    }
    None
}
