//! Funeral plans: the hymn and reading selections a family has made, and the block
//! lists for the documents printed from them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::block::{ContentBlock, HeadingLevel};
use crate::colour::colours;
use crate::error::Result;

const DEFAULT_TITLE: &str = "Catholic Funeral Plan";
const CHECKLIST_TITLE: &str = "Catholic Funeral Planning Checklist";

const CHECKLIST: [(&str, &[&str]); 4] = [
    (
        "Immediate Actions (First 24-48 hours)",
        &[
            "Contact parish priest or office",
            "Contact funeral home",
            "Notify family and close friends",
            "Begin planning vigil/wake service",
        ],
    ),
    (
        "Within First Week",
        &[
            "Schedule funeral service date and time",
            "Choose vigil location and date",
            "Select readings and music",
            "Coordinate with funeral home for transportation",
            "Prepare obituary",
        ],
    ),
    (
        "Final Preparations",
        &[
            "Prepare program for service",
            "Arrange burial/committal",
            "Organize hospitality for after burial",
            "Confirm all participants (readers, musicians)",
            "Prepare eulogy if desired",
        ],
    ),
    (
        "Important Notes",
        &[
            "Keep parish priest informed of all decisions",
            "Consider seasonal liturgical restrictions",
            "Plan for inclement weather at graveside",
            "Have backup plans for outdoor services",
        ],
    ),
];

const VIGIL_DESCRIPTION: &str = "A prayer service held the evening before the funeral, \
    often at a funeral home or church. The Vigil can also be held at home if other \
    locations are not possible.";

const VIGIL_OUTLINE: [(&str, &[&str]); 5] = [
    (
        "Opening",
        &["Gathering Song", "Sign of the Cross", "Opening Prayer"],
    ),
    (
        "Scripture Reading (15-20 minutes)",
        &[
            "Wisdom 3:1-9 (Hope and Resurrection)",
            "Psalm 23 (The Lord is My Shepherd)",
            "John 14:1-6 (Do Not Let Your Hearts Be Troubled)",
            "Romans 8:31-35, 37-39 (Nothing Can Separate Us)",
        ],
    ),
    (
        "Prayers and Remembrance",
        &[
            "Prayers of the Faithful",
            "Personal Tributes (2-3 minutes each)",
            "Shared Memories",
            "Silent Prayer",
        ],
    ),
    (
        "Closing",
        &["Final Prayer", "Blessing", "Sign of the Cross", "Closing Song"],
    ),
    (
        "Pastoral Notes",
        &[
            "Keep the service to 45-60 minutes",
            "Allow time for personal sharing",
            "Provide tissues and comfortable seating",
            "Consider having refreshments available after",
            "Respect cultural and family traditions",
        ],
    ),
];

const CONTACT_FALLBACK: &str = "For specific guidance on Catholic funeral planning, please \
    contact your local parish priest or funeral coordinator.";

/// The kinds of scripture reading, in the order they are proclaimed
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReadingKind {
    #[serde(rename = "First Reading")]
    FirstReading,
    Psalm,
    #[serde(rename = "Second Reading")]
    SecondReading,
    Gospel,
}

impl ReadingKind {
    pub const ALL: [ReadingKind; 4] = [
        ReadingKind::FirstReading,
        ReadingKind::Psalm,
        ReadingKind::SecondReading,
        ReadingKind::Gospel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReadingKind::FirstReading => "First Reading",
            ReadingKind::Psalm => "Psalm",
            ReadingKind::SecondReading => "Second Reading",
            ReadingKind::Gospel => "Gospel",
        }
    }
}

impl fmt::Display for ReadingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hymn {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(rename = "type")]
    pub kind: ReadingKind,
    pub title: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub text: String,
}

/// The documents a plan can be printed as
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Selected hymns and readings on as few pages as possible
    Flyer,
    /// The planning checklist
    Checklist,
    /// Cover, order of service, music, readings, vigil, and contact details
    Booklet,
}

impl DocumentKind {
    /// Suggested file name, without extension
    pub fn file_stem(&self) -> &'static str {
        match self {
            DocumentKind::Flyer => "funeral-plan",
            DocumentKind::Checklist => "funeral-checklist",
            DocumentKind::Booklet => "funeral-booklet",
        }
    }
}

/// A family's selections for a funeral service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuneralPlan {
    pub title: Option<String>,
    /// Name of the deceased
    pub deceased: Option<String>,
    pub church: Option<String>,
    /// Parish contact details, printed at the end of the booklet
    pub contact: Option<String>,
    pub hymns: Vec<Hymn>,
    /// At most one reading of each kind is printed; later duplicates are ignored
    pub readings: Vec<Reading>,
}

impl FuneralPlan {
    pub fn from_json(json: &str) -> Result<FuneralPlan> {
        Ok(serde_json::from_str(json)?)
    }

    /// The selected reading of `kind`, if any
    pub fn reading(&self, kind: ReadingKind) -> Option<&Reading> {
        self.readings.iter().find(|r| r.kind == kind)
    }

    pub fn document_title(&self, kind: DocumentKind) -> String {
        match kind {
            DocumentKind::Checklist => CHECKLIST_TITLE.to_string(),
            DocumentKind::Flyer => self
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            DocumentKind::Booklet => match (&self.title, &self.deceased) {
                (Some(title), _) => title.clone(),
                (None, Some(name)) => format!("In Loving Memory of {name}"),
                (None, None) => DEFAULT_TITLE.to_string(),
            },
        }
    }

    pub fn blocks(&self, kind: DocumentKind) -> Vec<ContentBlock> {
        match kind {
            DocumentKind::Flyer => self.flyer(),
            DocumentKind::Checklist => checklist(),
            DocumentKind::Booklet => self.booklet(),
        }
    }

    fn flyer(&self) -> Vec<ContentBlock> {
        let mut blocks = vec![ContentBlock::heading(HeadingLevel::H2, "Hymns")];
        if self.hymns.is_empty() {
            blocks.push(ContentBlock::paragraph("No hymn selected."));
        } else {
            blocks.push(ContentBlock::bullets(self.hymns.iter().map(|hymn| {
                match &hymn.youtube {
                    Some(link) => format!("{} ({link})", hymn.title),
                    None => hymn.title.clone(),
                }
            })));
        }

        blocks.push(ContentBlock::heading(HeadingLevel::H2, "Readings"));
        for kind in ReadingKind::ALL {
            match self.reading(kind) {
                Some(reading) => {
                    blocks.push(ContentBlock::heading(
                        HeadingLevel::H4,
                        format!("{kind}: {} ({})", reading.title, reading.reference),
                    ));
                    blocks.push(ContentBlock::paragraph(reading.text.as_str()));
                }
                None => blocks.push(ContentBlock::paragraph(format!("{kind}: [not selected]"))),
            }
        }
        blocks
    }

    fn booklet(&self) -> Vec<ContentBlock> {
        let mut blocks = vec![ContentBlock::banner(
            self.document_title(DocumentKind::Booklet),
            colours::VIOLET,
        )];
        let mut cover = String::from("In Loving Memory");
        if let Some(name) = &self.deceased {
            cover.push('\n');
            cover.push_str(name);
        }
        if let Some(church) = &self.church {
            cover.push_str("\n\n");
            cover.push_str(church);
        }
        blocks.push(ContentBlock::paragraph(cover));

        blocks.push(ContentBlock::heading(HeadingLevel::H2, "Order of Service"));
        blocks.push(ContentBlock::bullets(self.order_of_service()));

        blocks.push(ContentBlock::heading(HeadingLevel::H2, "Music"));
        if self.hymns.is_empty() {
            blocks.push(ContentBlock::paragraph("No hymn selected."));
        }
        for hymn in &self.hymns {
            blocks.push(ContentBlock::heading(HeadingLevel::H4, hymn.title.as_str()));
            if let Some(description) = &hymn.description {
                blocks.push(ContentBlock::paragraph(description.as_str()));
            }
        }

        blocks.push(ContentBlock::heading(HeadingLevel::H2, "Readings"));
        for kind in ReadingKind::ALL {
            match self.reading(kind) {
                Some(reading) => {
                    blocks.push(ContentBlock::heading(
                        HeadingLevel::H3,
                        format!("{kind}: {}", reading.title),
                    ));
                    blocks.push(ContentBlock::paragraph(format!(
                        "{}\n\n{}",
                        reading.text, reading.reference
                    )));
                }
                None => blocks.push(ContentBlock::paragraph(format!("{kind}: [not selected]"))),
            }
        }

        blocks.push(ContentBlock::heading(HeadingLevel::H2, "The Vigil / Wake"));
        blocks.push(ContentBlock::paragraph(VIGIL_DESCRIPTION));
        for (section, items) in VIGIL_OUTLINE {
            blocks.push(ContentBlock::heading(HeadingLevel::H4, section));
            blocks.push(ContentBlock::bullets(items.iter().copied()));
        }

        blocks.push(ContentBlock::heading(
            HeadingLevel::H2,
            "Contact & Parish Information",
        ));
        let mut contact = self
            .contact
            .clone()
            .unwrap_or_else(|| CONTACT_FALLBACK.to_string());
        if let Some(church) = &self.church {
            contact = format!("{church}\n{contact}");
        }
        blocks.push(ContentBlock::paragraph(contact));
        blocks
    }

    /// The funeral Mass, with the selected readings filled in
    fn order_of_service(&self) -> Vec<String> {
        let reading = |kind: ReadingKind, label: &str| match self.reading(kind) {
            Some(reading) => format!("{label}: {}", reading.reference),
            None => label.to_string(),
        };
        vec![
            "Gathering Music".to_string(),
            "Opening Prayer".to_string(),
            reading(ReadingKind::FirstReading, "First Reading"),
            reading(ReadingKind::Psalm, "Responsorial Psalm"),
            reading(ReadingKind::SecondReading, "Second Reading"),
            "Gospel Acclamation".to_string(),
            reading(ReadingKind::Gospel, "Gospel"),
            "Homily".to_string(),
            "Prayers of the Faithful".to_string(),
            "Preparation of the Gifts".to_string(),
            "Eucharistic Prayer".to_string(),
            "Communion".to_string(),
            "Final Commendation".to_string(),
            "Procession to Place of Committal".to_string(),
        ]
    }
}

fn checklist() -> Vec<ContentBlock> {
    let fills = [
        colours::VIOLET,
        colours::SLATE,
        colours::SAGE,
        colours::GOLD,
    ];
    CHECKLIST
        .iter()
        .zip(fills)
        .flat_map(|((section, items), fill)| {
            [
                ContentBlock::banner(*section, fill),
                ContentBlock::bullets(items.iter().copied()),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = r#"{
        "deceased": "Mary Margaret O'Brien",
        "church": "St. Patrick's Parish",
        "hymns": [
            {
                "title": "On Eagle's Wings",
                "youtube": "https://www.youtube.com/watch?v=GzA1NG6jZu0",
                "description": "A popular hymn of comfort and hope, based on Psalm 91."
            },
            { "title": "Amazing Grace" }
        ],
        "readings": [
            {
                "type": "Gospel",
                "title": "John 14:1-6",
                "ref": "John 14:1-6",
                "text": "Do not let your hearts be troubled."
            },
            {
                "type": "First Reading",
                "title": "Wisdom 3:1-9",
                "ref": "Wisdom 3:1-9",
                "text": "The souls of the just are in the hand of God."
            }
        ]
    }"#;

    fn texts(blocks: &[ContentBlock]) -> Vec<String> {
        blocks
            .iter()
            .map(|block| match block {
                ContentBlock::Heading { text, .. }
                | ContentBlock::Paragraph { text }
                | ContentBlock::Banner { text, .. } => text.clone(),
                ContentBlock::BulletList { items } => items.join(" | "),
            })
            .collect()
    }

    #[test]
    fn parses_the_planner_format() {
        let plan = FuneralPlan::from_json(PLAN).unwrap();
        assert_eq!(plan.hymns.len(), 2);
        assert_eq!(plan.hymns[1].youtube, None);
        assert_eq!(plan.readings[0].kind, ReadingKind::Gospel);
        assert_eq!(plan.reading(ReadingKind::FirstReading).unwrap().title, "Wisdom 3:1-9");
        assert!(plan.reading(ReadingKind::Psalm).is_none());
    }

    #[test]
    fn flyer_lists_readings_in_liturgical_order() {
        let plan = FuneralPlan::from_json(PLAN).unwrap();
        let texts = texts(&plan.blocks(DocumentKind::Flyer));
        assert_eq!(texts[0], "Hymns");
        assert_eq!(
            texts[1],
            "On Eagle's Wings (https://www.youtube.com/watch?v=GzA1NG6jZu0) | Amazing Grace"
        );
        assert_eq!(texts[2], "Readings");
        assert_eq!(texts[3], "First Reading: Wisdom 3:1-9 (Wisdom 3:1-9)");
        assert_eq!(texts[5], "Psalm: [not selected]");
        assert_eq!(texts[6], "Second Reading: [not selected]");
        assert_eq!(texts[7], "Gospel: John 14:1-6 (John 14:1-6)");
    }

    #[test]
    fn empty_plan_still_prints() {
        let plan = FuneralPlan::default();
        let texts = texts(&plan.blocks(DocumentKind::Flyer));
        assert_eq!(texts[1], "No hymn selected.");
        assert_eq!(plan.document_title(DocumentKind::Flyer), DEFAULT_TITLE);
        assert_eq!(plan.document_title(DocumentKind::Booklet), DEFAULT_TITLE);
    }

    #[test]
    fn checklist_alternates_banners_and_lists() {
        let blocks = FuneralPlan::default().blocks(DocumentKind::Checklist);
        assert_eq!(blocks.len(), 8);
        for pair in blocks.chunks(2) {
            assert_eq!(pair[0].kind(), "banner");
            assert_eq!(pair[1].kind(), "bullet_list");
        }
    }

    #[test]
    fn booklet_fills_in_the_order_of_service() {
        let plan = FuneralPlan::from_json(PLAN).unwrap();
        assert_eq!(
            plan.document_title(DocumentKind::Booklet),
            "In Loving Memory of Mary Margaret O'Brien"
        );
        let blocks = plan.blocks(DocumentKind::Booklet);
        let order = blocks
            .iter()
            .find_map(|block| match block {
                ContentBlock::BulletList { items } if items[0] == "Gathering Music" => {
                    Some(items.clone())
                }
                _ => None,
            })
            .expect("order of service");
        assert!(order.contains(&"First Reading: Wisdom 3:1-9".to_string()));
        assert!(order.contains(&"Responsorial Psalm".to_string()));
        assert!(order.contains(&"Gospel: John 14:1-6".to_string()));

        let texts = texts(&blocks);
        assert!(texts.iter().any(|t| t == "Contact & Parish Information"));
        assert!(texts.iter().any(|t| t.starts_with("St. Patrick's Parish\n")));
    }
}
