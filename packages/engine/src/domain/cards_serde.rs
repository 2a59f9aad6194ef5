//! Serialization and deserialization for card types
//!
//! Cards travel as their compact id token ("AK0"); redacted views travel
//! as the opaque "XX" token so a serialized event can never leak a hidden
//! card through its own identity.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, CardView, Rank, Suit};

// Suit serde
impl Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            Suit::Kreuz => "KREUZ",
            Suit::Schippe => "SCHIPPE",
            Suit::Herz => "HERZ",
            Suit::Bollen => "BOLLEN",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "KREUZ" => Ok(Suit::Kreuz),
            "SCHIPPE" => Ok(Suit::Schippe),
            "HERZ" => Ok(Suit::Herz),
            "BOLLEN" => Ok(Suit::Bollen),
            _ => Err(serde::de::Error::custom(format!("Invalid suit: {s}"))),
        }
    }
}

// Rank serde
impl Serialize for Rank {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            Rank::Unter => "UNTER",
            Rank::Ober => "OBER",
            Rank::Koenig => "KOENIG",
            Rank::Zehn => "ZEHN",
            Rank::Ass => "ASS",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "UNTER" => Ok(Rank::Unter),
            "OBER" => Ok(Rank::Ober),
            "KOENIG" => Ok(Rank::Koenig),
            "ZEHN" => Ok(Rank::Zehn),
            "ASS" => Ok(Rank::Ass),
            _ => Err(serde::de::Error::custom(format!("Invalid rank: {s}"))),
        }
    }
}

// Card serde (compact id token like "AK0")
impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Card>()
            .map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

// CardView serde ("XX" for redacted)
impl Serialize for CardView {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CardView {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<CardView>()
            .map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}
