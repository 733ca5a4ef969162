//! Custom serde deserializers for mixed-content PubMed fields

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// One `<AbstractText>` section with its optional `Label` attribute
///
/// Structured abstracts split the text into labeled sections
/// (`BACKGROUND`, `METHODS`, ...); unstructured ones have a single unlabeled
/// section.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(super) struct AbstractTextElement {
    pub label: Option<String>,
    pub text: String,
}

impl<'de> Deserialize<'de> for AbstractTextElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AbstractTextVisitor)
    }
}

struct AbstractTextVisitor;

impl<'de> Visitor<'de> for AbstractTextVisitor {
    type Value = AbstractTextElement;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("abstract text content")
    }

    fn visit_str<E>(self, value: &str) -> Result<AbstractTextElement, E>
    where
        E: de::Error,
    {
        Ok(AbstractTextElement {
            label: None,
            text: value.to_string(),
        })
    }

    fn visit_string<E>(self, value: String) -> Result<AbstractTextElement, E>
    where
        E: de::Error,
    {
        Ok(AbstractTextElement {
            label: None,
            text: value,
        })
    }

    fn visit_unit<E>(self) -> Result<AbstractTextElement, E>
    where
        E: de::Error,
    {
        Ok(AbstractTextElement::default())
    }

    fn visit_map<M>(self, mut map: M) -> Result<AbstractTextElement, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut element = AbstractTextElement::default();
        let mut text_parts = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "$text" | "$value" => text_parts.push(map.next_value::<String>()?),
                "@Label" => element.label = Some(map.next_value()?),
                // NlmCategory and any leftover markup children
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        element.text = text_parts.join("");
        Ok(element)
    }
}

/// Text of an element that may carry markup children
///
/// Only the element's own text runs are kept; child elements such as
/// `<mml:math>` or `<sc>` are skipped along with their content.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(super) struct MixedText(pub String);

impl<'de> Deserialize<'de> for MixedText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MixedTextVisitor)
    }
}

struct MixedTextVisitor;

impl<'de> Visitor<'de> for MixedTextVisitor {
    type Value = MixedText;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("text with optional markup children")
    }

    fn visit_str<E>(self, value: &str) -> Result<MixedText, E>
    where
        E: de::Error,
    {
        Ok(MixedText(value.to_string()))
    }

    fn visit_string<E>(self, value: String) -> Result<MixedText, E>
    where
        E: de::Error,
    {
        Ok(MixedText(value))
    }

    fn visit_unit<E>(self) -> Result<MixedText, E>
    where
        E: de::Error,
    {
        Ok(MixedText::default())
    }

    fn visit_map<M>(self, mut map: M) -> Result<MixedText, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut text_parts = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "$text" | "$value" => text_parts.push(map.next_value::<String>()?),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        // Runs on either side of a skipped child must not fuse into one word
        Ok(MixedText(text_parts.join(" ")))
    }
}
