//! Answer formatting.
//!
//! Substring heuristics decide how an answer is laid out. Rules are checked
//! in a fixed order: solar report, then zoning answer, then plain text.
//! Nothing here fails; unexpected input falls through to plain text.

const ADDRESS_MARKER: &str = "Extracted Address";
const ADDRESS_PREFIX: &str = "Extracted Address: ";
const ADDRESS_LABEL: &str = "Extracted Address:";
const SOLAR_MARKER: &str = "Solar Resource Data";
const SOLAR_LABEL: &str = "Solar Resource Data:";
const LATITUDE_LABEL: &str = "Latitude:";
const LONGITUDE_LABEL: &str = "Longitude:";
const RAG_MARKER: &str = "RAG output";
const RAG_PREFIX: &str = "RAG output: ";
const ZONING_MARKERS: [&str; 3] = [RAG_MARKER, "zoning", "regulation"];

/// Which layout an answer gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind
{   SolarReport
  , Zoning
  , Plain
}

impl AnswerKind
{   pub fn classify(answer: &str) -> Self
    {   if answer.contains(SOLAR_MARKER) || answer.contains(ADDRESS_MARKER)
        {   AnswerKind::SolarReport
        } else if ZONING_MARKERS.iter().any(|m| answer.contains(m))
        {   AnswerKind::Zoning
        } else
        {   AnswerKind::Plain
        }
    }
}

/// Labeled section kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind
{   Address
  , Coordinates
  , SolarResourceData
  , ZoningInformation
}

impl SectionKind
{   pub fn title(&self) -> &'static str
    {   match self
        {   SectionKind::Address => "Address"
          , SectionKind::Coordinates => "Coordinates"
          , SectionKind::SolarResourceData => "Solar Resource Data"
          , SectionKind::ZoningInformation => "Zoning Information"
        }
    }

    /// Font Awesome icon name
    pub fn icon(&self) -> &'static str
    {   match self
        {   SectionKind::Address => "map-marker-alt"
          , SectionKind::Coordinates => "globe"
          , SectionKind::SolarResourceData => "solar-panel"
          , SectionKind::ZoningInformation => "building"
        }
    }
}

/// One rendered unit of a formatted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block
{   Section
    {   kind: SectionKind
      , body: String
    }
  , Paragraph(String)
}

impl Block
{   pub fn to_markup(&self) -> String
    {   match self
        {   Block::Section { kind, body } => {
              format!(
                "<div class=\"result-section\"><h3><i class=\"fas fa-{}\"></i> {}</h3><p>{}</p></div>",
                kind.icon(),
                kind.title(),
                escape_html(body)
              )
            }
          , Block::Paragraph(text) => {
              format!("<p>{}</p>", escape_html(text))
            }
        }
    }
}

/// Structured view of an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedAnswer
{   Blocks(Vec<Block>)
  , Plain(String)
}

impl FormattedAnswer
{   pub fn parse(answer: &str) -> Self
    {   match AnswerKind::classify(answer)
        {   AnswerKind::SolarReport => {
              FormattedAnswer::Blocks(solar_blocks(answer))
            }
          , AnswerKind::Zoning => {
              let body = answer.replacen(RAG_PREFIX, "", 1);
              FormattedAnswer::Blocks(vec![
                Block::Section
                {   kind: SectionKind::ZoningInformation
                  , body: body.trim().to_string()
                }
              ])
            }
          , AnswerKind::Plain => FormattedAnswer::Plain(answer.to_string())
        }
    }

    pub fn to_markup(&self) -> String
    {   match self
        {   FormattedAnswer::Blocks(blocks) => {
              blocks.iter().map(Block::to_markup).collect()
            }
          , FormattedAnswer::Plain(text) => text.clone()
        }
    }
}

fn solar_blocks(answer: &str) -> Vec<Block>
{   answer
      .split("\n\n")
      .map(|part| {
        if part.contains(ADDRESS_LABEL)
        {   Block::Section
            {   kind: SectionKind::Address
              , body: part.replacen(ADDRESS_PREFIX, "", 1).trim().to_string()
            }
        } else if part.contains(LATITUDE_LABEL)
          && part.contains(LONGITUDE_LABEL)
        {   Block::Section
            {   kind: SectionKind::Coordinates
              , body: part.trim().to_string()
            }
        } else if part.contains(SOLAR_LABEL)
        {   Block::Section
            {   kind: SectionKind::SolarResourceData
              , body: part.replacen(SOLAR_LABEL, "", 1).trim().to_string()
            }
        } else
        {   Block::Paragraph(part.trim().to_string())
        }
      })
      .collect()
}

/// Format an answer for display.
/// Plain answers come back unchanged; structured ones as HTML sections.
pub fn format_answer(answer: &str) -> String
{   FormattedAnswer::parse(answer).to_markup()
}

/// Inline error panel markup
pub fn render_error(message: &str) -> String
{   format!(
      "<div class=\"error-panel\"><i class=\"fas fa-exclamation-triangle\"></i> <strong>Error:</strong> {}</div>",
      escape_html(message)
    )
}

pub fn escape_html(text: &str) -> String
{   let mut out = String::with_capacity(text.len());
    for c in text.chars()
    {   match c
        {   '&' => out.push_str("&amp;")
          , '<' => out.push_str("&lt;")
          , '>' => out.push_str("&gt;")
          , '"' => out.push_str("&quot;")
          , '\'' => out.push_str("&#39;")
          , _ => out.push(c)
        }
    }
    out
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn zoning_answer_becomes_single_section()
    {   let markup = format_answer("RAG output: Zoned R-1");
        assert_eq!(
          markup,
          "<div class=\"result-section\"><h3><i class=\"fas fa-building\"></i> Zoning Information</h3><p>Zoned R-1</p></div>"
        );
    }

    #[test]
    fn solar_report_splits_into_sections()
    {   let parsed = FormattedAnswer::parse(
          "Extracted Address: 1 Solar Way\n\nSolar Resource Data: 5.3 kWh/m2/day"
        );
        assert_eq!(
          parsed,
          FormattedAnswer::Blocks(vec![
            Block::Section
            {   kind: SectionKind::Address
              , body: "1 Solar Way".to_string()
            }
          , Block::Section
            {   kind: SectionKind::SolarResourceData
              , body: "5.3 kWh/m2/day".to_string()
            }
          ])
        );
    }

    #[test]
    fn coordinates_and_stray_paragraphs()
    {   let parsed = FormattedAnswer::parse(
          "Extracted Address: 9 Elm\n\nLatitude: 40.1, Longitude: -105.2\n\nSee NREL for details."
        );
        let FormattedAnswer::Blocks(blocks) = parsed else
        {   panic!("expected blocks");
        };
        assert_eq!(blocks.len(), 3);
        assert_eq!(
          blocks[1],
          Block::Section
          {   kind: SectionKind::Coordinates
            , body: "Latitude: 40.1, Longitude: -105.2".to_string()
          }
        );
        assert_eq!(
          blocks[2],
          Block::Paragraph("See NREL for details.".to_string())
        );
    }

    #[test]
    fn paragraphs_are_trimmed_like_sections()
    {   let parsed = FormattedAnswer::parse(
          "Solar Resource Data:  6.1 \n\n  Note: clear skies  \n"
        );
        assert_eq!(
          parsed,
          FormattedAnswer::Blocks(vec![
            Block::Section
            {   kind: SectionKind::SolarResourceData
              , body: "6.1".to_string()
            }
          , Block::Paragraph("Note: clear skies".to_string())
          ])
        );
    }

    #[test]
    fn latitude_alone_is_not_coordinates()
    {   let markup = format_answer(
          "Solar Resource Data: 4.9\n\nLatitude: 40.1"
        );
        assert!(markup.ends_with("<p>Latitude: 40.1</p>"));
    }

    #[test]
    fn solar_rule_beats_zoning_rule()
    {   let answer = "Solar Resource Data: 5.0\n\nzoning allows panels";
        assert_eq!(AnswerKind::classify(answer), AnswerKind::SolarReport);
        assert!(!format_answer(answer).contains("Zoning Information"));
    }

    #[test]
    fn zoning_markers_are_case_sensitive()
    {   assert_eq!(AnswerKind::classify("the regulation says"), AnswerKind::Zoning);
        assert_eq!(AnswerKind::classify("Zoning is R-2"), AnswerKind::Plain);
    }

    #[test]
    fn plain_text_is_unchanged()
    {   let answer = "Panels must be 3 ft from the ridge <per code>.";
        assert_eq!(format_answer(answer), answer);
    }

    #[test]
    fn section_text_is_escaped()
    {   let markup = format_answer("RAG output: setback < 5 ft & height > 2");
        assert!(markup.contains("<p>setback &lt; 5 ft &amp; height &gt; 2</p>"));
    }

    #[test]
    fn error_panel_carries_message()
    {   let markup = render_error("Please enter a query");
        assert!(markup.starts_with("<div class=\"error-panel\">"));
        assert!(markup.contains("<strong>Error:</strong> Please enter a query"));
    }
}
