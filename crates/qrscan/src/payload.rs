//! Builders for the text encoded by the QR generator.

use serde::{Deserialize, Serialize};

use crate::record::ScanKind;

/// Wi-Fi authentication type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WifiEncryption {
    /// WPA/WPA2 personal.
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    /// Legacy WEP.
    #[serde(rename = "WEP")]
    Wep,
    /// Open network.
    #[serde(rename = "nopass")]
    None,
}

impl WifiEncryption {
    fn as_str(self) -> &'static str {
        match self {
            Self::Wpa => "WPA",
            Self::Wep => "WEP",
            Self::None => "nopass",
        }
    }
}

/// Something the generator can turn into a QR payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A link, encoded verbatim.
    Url(String),
    /// Free text, encoded verbatim.
    Text(String),
    /// Network credentials.
    Wifi {
        /// Network name.
        ssid: String,
        /// Network key.
        password: String,
        /// Authentication type.
        encryption: WifiEncryption,
    },
    /// A vCard 3.0 contact.
    Contact {
        /// Full name.
        name: String,
        /// Email address.
        email: String,
        /// Phone number.
        phone: String,
        /// Postal address.
        address: String,
    },
}

impl Payload {
    /// The text to encode.
    ///
    /// Returns an empty string when a required field is missing; the encoder
    /// rejects empty input.
    #[must_use]
    pub fn to_content(&self) -> String {
        match self {
            Self::Url(text) | Self::Text(text) => text.clone(),
            Self::Wifi {
                ssid,
                password,
                encryption,
            } => {
                if ssid.is_empty() {
                    return String::new();
                }
                format!("WIFI:S:{ssid};T:{};P:{password};;", encryption.as_str())
            }
            Self::Contact {
                name,
                email,
                phone,
                address,
            } => {
                if name.is_empty() {
                    return String::new();
                }
                format!(
                    "BEGIN:VCARD\nVERSION:3.0\nN:{name}\nEMAIL:{email}\nTEL:{phone}\nADR:{address}\nEND:VCARD"
                )
            }
        }
    }

    /// Kind a scanner would classify the generated content as.
    #[must_use]
    pub fn kind(&self) -> ScanKind {
        ScanKind::classify(&self.to_content())
    }

    /// Short name used in output file names.
    #[must_use]
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Url(_) => "url",
            Self::Text(_) => "text",
            Self::Wifi { .. } => "wifi",
            Self::Contact { .. } => "contact",
        }
    }
}
