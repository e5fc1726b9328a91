//! BXML: the call-control markup a webhook answers with.
//!
//! # Design
//! A [`Response`] is an ordered list of [`Verb`]s. Rendering walks the list
//! with a `quick_xml::Writer` and always emits explicit start and end tags
//! (`<Hangup></Hangup>`, never `<Hangup/>`). Optional attributes that are
//! `None` are left out. Text and attribute values are XML-escaped by the
//! writer.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::ApiError;

type XmlWriter = Writer<Vec<u8>>;

fn emit(writer: &mut XmlWriter, event: Event<'_>) -> Result<(), ApiError> {
    writer
        .write_event(event)
        .map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Write `<name attrs...>` then `body`, then `</name>`.
fn element(
    writer: &mut XmlWriter,
    name: &str,
    attributes: &[(&str, Option<String>)],
    body: impl FnOnce(&mut XmlWriter) -> Result<(), ApiError>,
) -> Result<(), ApiError> {
    let mut start = BytesStart::new(name);
    for (key, value) in attributes {
        if let Some(value) = value {
            start.push_attribute((*key, value.as_str()));
        }
    }
    emit(writer, Event::Start(start))?;
    body(writer)?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn text(writer: &mut XmlWriter, value: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Ok(());
    }
    emit(writer, Event::Text(BytesText::new(value)))
}

fn attr<V: ToString>(value: &Option<V>) -> Option<String> {
    value.as_ref().map(ToString::to_string)
}

/// Root element of a BXML document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub verbs: Vec<Verb>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a verb, builder style.
    pub fn with(mut self, verb: impl Into<Verb>) -> Self {
        self.verbs.push(verb.into());
        self
    }

    pub fn push(&mut self, verb: impl Into<Verb>) {
        self.verbs.push(verb.into());
    }

    pub fn to_xml(&self) -> Result<String, ApiError> {
        let mut writer = Writer::new(Vec::new());
        element(&mut writer, "Response", &[], |w| {
            self.verbs.iter().try_for_each(|verb| verb.write(w))
        })?;
        String::from_utf8(writer.into_inner()).map_err(|e| ApiError::Serialization(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verb {
    Gather(Gather),
    Pause(Pause),
    Hangup(Hangup),
    PlayAudio(PlayAudio),
    Record(Record),
    Redirect(Redirect),
    Reject(Reject),
    SendMessage(SendMessage),
    SpeakSentence(SpeakSentence),
    Transfer(Transfer),
}

impl Verb {
    fn write(&self, w: &mut XmlWriter) -> Result<(), ApiError> {
        match self {
            Verb::Gather(v) => v.write(w),
            Verb::Pause(v) => v.write(w),
            Verb::Hangup(v) => v.write(w),
            Verb::PlayAudio(v) => v.write(w),
            Verb::Record(v) => v.write(w),
            Verb::Redirect(v) => v.write(w),
            Verb::Reject(v) => v.write(w),
            Verb::SendMessage(v) => v.write(w),
            Verb::SpeakSentence(v) => v.write(w),
            Verb::Transfer(v) => v.write(w),
        }
    }
}

macro_rules! impl_into_verb {
    ($($name:ident),* $(,)?) => {
        $(
            impl From<$name> for Verb {
                fn from(verb: $name) -> Self {
                    Verb::$name(verb)
                }
            }
        )*
    };
}

impl_into_verb!(Gather, Pause, Hangup, PlayAudio, Record, Redirect, Reject, SendMessage, SpeakSentence, Transfer);

/// Collect DTMF digits and post them to `request_url`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gather {
    pub request_url: String,
    pub request_url_timeout: Option<u32>,
    pub terminating_digits: Option<String>,
    pub max_digits: Option<u32>,
    pub inter_digit_timeout: Option<u32>,
    pub bargeable: Option<bool>,
    pub tag: Option<String>,
    /// Played while waiting for digits.
    pub speak_sentence: Option<SpeakSentence>,
    pub play_audio: Option<PlayAudio>,
}

impl Gather {
    fn write(&self, w: &mut XmlWriter) -> Result<(), ApiError> {
        let attributes = [
            ("requestUrl", Some(self.request_url.clone())),
            ("requestUrlTimeout", attr(&self.request_url_timeout)),
            ("terminatingDigits", attr(&self.terminating_digits)),
            ("maxDigits", attr(&self.max_digits)),
            ("interDigitTimeout", attr(&self.inter_digit_timeout)),
            ("bargeable", attr(&self.bargeable)),
            ("tag", attr(&self.tag)),
        ];
        element(w, "Gather", &attributes, |w| {
            if let Some(sentence) = &self.speak_sentence {
                sentence.write(w)?;
            }
            if let Some(audio) = &self.play_audio {
                audio.write(w)?;
            }
            Ok(())
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pause {
    /// Seconds.
    pub duration: u32,
}

impl Pause {
    fn write(&self, w: &mut XmlWriter) -> Result<(), ApiError> {
        element(w, "Pause", &[("duration", Some(self.duration.to_string()))], |_| Ok(()))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hangup;

impl Hangup {
    fn write(&self, w: &mut XmlWriter) -> Result<(), ApiError> {
        element(w, "Hangup", &[], |_| Ok(()))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayAudio {
    pub url: String,
}

impl PlayAudio {
    fn write(&self, w: &mut XmlWriter) -> Result<(), ApiError> {
        element(w, "PlayAudio", &[], |w| text(w, &self.url))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub request_url: String,
    pub request_url_timeout: Option<u32>,
    pub file_format: Option<String>,
    pub terminating_digits: Option<String>,
    pub max_duration: Option<u32>,
    pub transcribe: Option<bool>,
    pub transcribe_callback_url: Option<String>,
    pub tag: Option<String>,
}

impl Record {
    fn write(&self, w: &mut XmlWriter) -> Result<(), ApiError> {
        let attributes = [
            ("requestUrl", Some(self.request_url.clone())),
            ("requestUrlTimeout", attr(&self.request_url_timeout)),
            ("fileFormat", attr(&self.file_format)),
            ("terminatingDigits", attr(&self.terminating_digits)),
            ("maxDuration", attr(&self.max_duration)),
            ("transcribe", attr(&self.transcribe)),
            ("transcribeCallbackUrl", attr(&self.transcribe_callback_url)),
            ("tag", attr(&self.tag)),
        ];
        element(w, "Record", &attributes, |_| Ok(()))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Redirect {
    pub request_url: String,
    pub request_url_timeout: Option<u32>,
}

impl Redirect {
    fn write(&self, w: &mut XmlWriter) -> Result<(), ApiError> {
        let attributes = [
            ("requestUrl", Some(self.request_url.clone())),
            ("requestUrlTimeout", attr(&self.request_url_timeout)),
        ];
        element(w, "Redirect", &attributes, |_| Ok(()))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reject {
    /// `busy`, `rejected` or `none`.
    pub reason: String,
}

impl Reject {
    fn write(&self, w: &mut XmlWriter) -> Result<(), ApiError> {
        element(w, "Reject", &[("reason", Some(self.reason.clone()))], |_| Ok(()))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendMessage {
    pub from: String,
    pub to: String,
    pub text: String,
    pub request_url: Option<String>,
    pub request_url_timeout: Option<u32>,
    pub status_callback_url: Option<String>,
}

impl SendMessage {
    fn write(&self, w: &mut XmlWriter) -> Result<(), ApiError> {
        let attributes = [
            ("from", Some(self.from.clone())),
            ("to", Some(self.to.clone())),
            ("requestUrl", self.request_url.clone()),
            ("requestUrlTimeout", attr(&self.request_url_timeout)),
            ("statusCallbackUrl", self.status_callback_url.clone()),
        ];
        element(w, "SendMessage", &attributes, |w| text(w, &self.text))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeakSentence {
    pub sentence: String,
    pub voice: Option<String>,
    pub gender: Option<String>,
    pub locale: Option<String>,
}

impl SpeakSentence {
    pub fn new(sentence: &str) -> Self {
        Self {
            sentence: sentence.to_string(),
            ..Default::default()
        }
    }

    fn write(&self, w: &mut XmlWriter) -> Result<(), ApiError> {
        let attributes = [
            ("voice", self.voice.clone()),
            ("gender", self.gender.clone()),
            ("locale", self.locale.clone()),
        ];
        element(w, "SpeakSentence", &attributes, |w| text(w, &self.sentence))
    }
}

/// Bridge the call to another number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transfer {
    pub transfer_to: String,
    pub transfer_caller_id: Option<String>,
    pub call_timeout: Option<u32>,
    pub request_url: Option<String>,
    pub request_url_timeout: Option<u32>,
    pub tag: Option<String>,
    /// Played to the caller while the transfer is set up.
    pub speak_sentence: Option<SpeakSentence>,
    pub play_audio: Option<PlayAudio>,
}

impl Transfer {
    fn write(&self, w: &mut XmlWriter) -> Result<(), ApiError> {
        let attributes = [
            ("transferTo", Some(self.transfer_to.clone())),
            ("transferCallerId", self.transfer_caller_id.clone()),
            ("callTimeout", attr(&self.call_timeout)),
            ("requestUrl", self.request_url.clone()),
            ("requestUrlTimeout", attr(&self.request_url_timeout)),
            ("tag", self.tag.clone()),
        ];
        element(w, "Transfer", &attributes, |w| {
            if let Some(sentence) = &self.speak_sentence {
                sentence.write(w)?;
            }
            if let Some(audio) = &self.play_audio {
                audio.write(w)?;
            }
            Ok(())
        })
    }
}
