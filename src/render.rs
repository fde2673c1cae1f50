use crate::types::{Activity, Workout};
use crate::utils::one_decimal;
use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

/// Markup of one list entry:
///
/// ```html
/// <li class="workout workout--running" data-id="3087000123">
///   <h2 class="workout__title">Running on April 14</h2>
///   <div class="workout__details">...</div>  x4
/// </li>
/// ```
pub fn render_entry(workout: &Workout) -> Result<String> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);

    let kind = workout.kind();
    let class = format!("workout workout--{kind}");
    let mut li = BytesStart::new("li");
    li.push_attribute(("class", class.as_str()));
    li.push_attribute(("data-id", workout.id()));
    xml.write_event(Event::Start(li))?;

    let mut title = BytesStart::new("h2");
    title.push_attribute(("class", "workout__title"));
    xml.write_event(Event::Start(title))?;
    xml.write_event(Event::Text(BytesText::new(workout.description())))?;
    xml.write_event(Event::End(BytesEnd::new("h2")))?;

    let distance = workout.distance().to_string();
    let duration = workout.duration().to_string();
    write_details(&mut xml, kind.icon(), &distance, "km")?;
    write_details(&mut xml, "⏱", &duration, "min")?;

    match workout.activity() {
        Activity::Running { cadence, pace } => {
            write_details(&mut xml, "⚡️", &one_decimal(*pace), "min/km")?;
            write_details(&mut xml, "🦶🏼", &cadence.to_string(), "spm")?;
        }
        Activity::Cycling {
            elevation_gain,
            speed,
        } => {
            write_details(&mut xml, "⚡️", &one_decimal(*speed), "km/h")?;
            write_details(&mut xml, "⛰", &elevation_gain.to_string(), "m")?;
        }
    }

    xml.write_event(Event::End(BytesEnd::new("li")))?;

    Ok(String::from_utf8(xml.into_inner())?)
}

fn write_details(xml: &mut Writer<Vec<u8>>, icon: &str, value: &str, unit: &str) -> Result<()> {
    let mut div = BytesStart::new("div");
    div.push_attribute(("class", "workout__details"));
    xml.write_event(Event::Start(div))?;
    write_span(xml, "workout__icon", icon)?;
    write_span(xml, "workout__value", value)?;
    write_span(xml, "workout__unit", unit)?;
    xml.write_event(Event::End(BytesEnd::new("div")))?;
    Ok(())
}

fn write_span(xml: &mut Writer<Vec<u8>>, class: &str, text: &str) -> Result<()> {
    let mut span = BytesStart::new("span");
    span.push_attribute(("class", class));
    xml.write_event(Event::Start(span))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new("span")))?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: String,
    pub html: String,
}

/// The on-page workout list. Each entry goes right after the form, so the
/// newest workout comes first.
#[derive(Debug, Default)]
pub struct ListPanel {
    entries: Vec<ListEntry>,
}

impl ListPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, workout: &Workout) -> Result<()> {
        let html = render_entry(workout)?;
        self.entries.insert(
            0,
            ListEntry {
                id: workout.id().to_string(),
                html,
            },
        );
        Ok(())
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn markup(&self) -> String {
        let mut out = String::new();
        for e in &self.entries {
            out.push_str(&e.html);
            out.push('\n');
        }
        out
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
