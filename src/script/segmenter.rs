// Block-level state machine that turns an extracted script into sections.
//
// The raw text is cut into blocks on four-newline boundaries. Each block is
// examined once, in order: the closing boilerplate check first, then the
// front-matter gate, then action/scene/dialogue classification.

use tracing::{debug, info};

use super::text::{is_upper, preview};
use super::{ParsedScript, SectionKey};
use crate::error::{Result, ScriptError};

/// Literals and separators the segmenter keys on
#[derive(Debug, Clone)]
pub struct SegmentationRules {
    /// Boundary between coarse blocks (one empty paragraph in the source document)
    pub block_separator: String,
    /// Boundary between paragraphs inside a block
    pub paragraph_separator: String,
    /// Literal that opens the content-warnings section
    pub content_warnings_marker: String,
    /// Phrase that follows the podcast name in the closing boilerplate
    pub distribution_phrase: String,
    /// Separators between podcast name and episode title, tried in order
    pub title_separators: Vec<char>,
    /// Dash characters that mark a scene header
    pub scene_dashes: Vec<char>,
}

impl Default for SegmentationRules {
    fn default() -> Self {
        Self {
            block_separator: "\n\n\n\n".to_string(),
            paragraph_separator: "\n\n".to_string(),
            content_warnings_marker: "Content Warnings".to_string(),
            distribution_phrase: "is a podcast distributed by".to_string(),
            title_separators: vec!['\u{2013}', '-'],
            scene_dashes: vec!['-', '\u{2013}'],
        }
    }
}

/// Where the segmenter is in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Preamble before the content warnings (title, cast, credits)
    BeginningInfo,
    /// Content-warning text
    ContentWarnings,
    /// Episode proper
    Body,
    /// Closing boilerplate; absorbing
    EndingInfo,
}

impl Phase {
    /// Phase after a scene or action block is seen outside the episode body
    fn enter_episode(self) -> Phase {
        match self {
            Phase::BeginningInfo | Phase::ContentWarnings => Phase::Body,
            other => other,
        }
    }

    /// Section that swallows whole blocks while in this phase
    fn front_matter_section(self) -> Option<SectionKey> {
        match self {
            Phase::BeginningInfo | Phase::EndingInfo => Some(SectionKey::EpisodeInfo),
            Phase::ContentWarnings => Some(SectionKey::ContentWarnings),
            Phase::Body => None,
        }
    }
}

/// Accumulator threaded through the block loop
#[derive(Debug)]
struct SegmentState {
    phase: Phase,
    current_speaker: Option<SectionKey>,
    parsed: ParsedScript,
}

impl SegmentState {
    fn new() -> Self {
        Self {
            phase: Phase::BeginningInfo,
            current_speaker: None,
            parsed: ParsedScript::new(),
        }
    }
}

/// Splits raw script text into a `ParsedScript`
pub struct ScriptSegmenter {
    rules: SegmentationRules,
}

impl ScriptSegmenter {
    pub fn new(rules: SegmentationRules) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self::new(SegmentationRules::default())
    }

    /// Segment a whole script. Fails when the text has no block boundary, no
    /// podcast name in its first block, or dialogue with no speaker.
    pub fn segment(&self, raw_text: &str) -> Result<ParsedScript> {
        if raw_text.trim().is_empty() {
            return Err(ScriptError::malformed("document contains no text"));
        }

        let blocks: Vec<&str> = raw_text.split(self.rules.block_separator.as_str()).collect();
        if blocks.len() < 2 {
            return Err(ScriptError::malformed(format!(
                "no block boundary ({} consecutive newlines) found in {} characters of text",
                self.rules.block_separator.len(),
                raw_text.chars().count()
            )));
        }

        let podcast_name = self.podcast_name(blocks[0])?;
        let closing_sentence = format!("{podcast_name} {}", self.rules.distribution_phrase);
        debug!(
            "Segmenting {} blocks for podcast {:?}",
            blocks.len(),
            podcast_name
        );

        let mut state = SegmentState::new();
        for (block_index, block) in blocks.iter().enumerate() {
            let chunk = block.trim();
            if chunk.is_empty() {
                continue;
            }
            state = self.step(state, block_index, chunk, &closing_sentence)?;
        }

        info!(
            "Segmented script into {} sections ({} speakers, {} chunks)",
            state.parsed.section_count(),
            state.parsed.speakers().count(),
            state.parsed.chunk_count()
        );
        Ok(state.parsed)
    }

    /// Podcast name: first-block text before the title separator
    pub fn podcast_name(&self, first_block: &str) -> Result<String> {
        let header = first_block.trim();
        let cut = self
            .rules
            .title_separators
            .iter()
            .find_map(|separator| header.find(*separator))
            .ok_or_else(|| {
                ScriptError::malformed(format!(
                    "title block {:?} has no dash separating the podcast name",
                    preview(header, 60)
                ))
            })?;

        let name = header[..cut].trim_end();
        if name.is_empty() {
            return Err(ScriptError::malformed(format!(
                "title block {:?} starts with its separator; podcast name is empty",
                preview(header, 60)
            )));
        }
        Ok(name.to_string())
    }

    fn step(
        &self,
        mut state: SegmentState,
        block_index: usize,
        chunk: &str,
        closing_sentence: &str,
    ) -> Result<SegmentState> {
        if chunk.contains(closing_sentence) && state.phase != Phase::EndingInfo {
            debug!(block_index, "Closing boilerplate reached");
            state.phase = Phase::EndingInfo;
        }

        if state.phase != Phase::Body {
            if state.phase == Phase::BeginningInfo
                && chunk.contains(self.rules.content_warnings_marker.as_str())
            {
                debug!(block_index, "Content warnings start");
                state.phase = Phase::ContentWarnings;
            }

            if self.is_action(chunk) || self.is_scene(chunk) {
                debug!(block_index, from = ?state.phase, "First episode block");
                state.phase = state.phase.enter_episode();
            } else if let Some(section) = state.phase.front_matter_section() {
                state.parsed.extend(section, self.paragraphs(chunk));
                return Ok(state);
            }
        }

        self.classify(state, block_index, chunk)
    }

    fn classify(
        &self,
        mut state: SegmentState,
        block_index: usize,
        chunk: &str,
    ) -> Result<SegmentState> {
        if self.is_action(chunk) {
            let actions = self.split_actions(chunk);
            debug!(block_index, count = actions.len(), "Action block");
            state.parsed.extend(SectionKey::Actions, actions);
            return Ok(state);
        }

        if self.is_scene(chunk) {
            debug!(block_index, scene = %preview(chunk, 60), "Scene block");
            state
                .parsed
                .push(SectionKey::Scenes, chunk.replace(self.rules.paragraph_separator.as_str(), ""));
            return Ok(state);
        }

        self.attribute_dialogue(state, block_index, chunk)
    }

    fn attribute_dialogue(
        &self,
        mut state: SegmentState,
        block_index: usize,
        chunk: &str,
    ) -> Result<SegmentState> {
        let mut segments = chunk.split(self.rules.paragraph_separator.as_str());
        let label = segments.next().unwrap_or_default();

        if is_upper(label) {
            let name = speaker_name(label);
            if name.is_empty() {
                return Err(ScriptError::UndefinedSpeaker {
                    block_index,
                    text: chunk.to_string(),
                });
            }

            let speech = segments.collect::<Vec<_>>().join(" ");
            let speaker = SectionKey::Speaker(name.to_string());
            state.parsed.ensure(speaker.clone());
            // A bare label opens the section but stores no empty chunk, so
            // chunk indices only count real speech.
            if !speech.trim().is_empty() {
                state.parsed.push(speaker.clone(), speech);
            }
            debug!(block_index, speaker = name, "Dialogue block");
            state.current_speaker = Some(speaker);
        } else {
            let Some(speaker) = state.current_speaker.clone() else {
                return Err(ScriptError::UndefinedSpeaker {
                    block_index,
                    text: chunk.to_string(),
                });
            };
            debug!(block_index, speaker = %speaker, "Continued speech");
            state.parsed.push(speaker, chunk);
        }

        Ok(state)
    }

    fn is_action(&self, chunk: &str) -> bool {
        chunk.starts_with('[') && chunk.ends_with(']')
    }

    fn is_scene(&self, chunk: &str) -> bool {
        chunk.contains(self.rules.scene_dashes.as_slice()) && is_upper(chunk)
    }

    /// Non-empty paragraphs of a front-matter block
    fn paragraphs<'a>(&self, chunk: &'a str) -> Vec<&'a str> {
        chunk
            .split(self.rules.paragraph_separator.as_str())
            .map(str::trim)
            .filter(|paragraph| !paragraph.is_empty())
            .collect()
    }

    /// `"[a][b]"` → `["[a]", "[b]"]`
    fn split_actions(&self, chunk: &str) -> Vec<String> {
        chunk
            .replace(self.rules.paragraph_separator.as_str(), "")
            .split(']')
            .map(str::trim)
            .filter(|action| !action.is_empty())
            .map(|action| format!("{action}]"))
            .collect()
    }
}

impl Default for ScriptSegmenter {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

/// Leading run of word and space characters of a speaker label
/// (`"JAMES (V.O.)"` → `"JAMES"`)
fn speaker_name(label: &str) -> &str {
    label
        .split(|ch: char| !(ch.is_alphanumeric() || ch == '_' || ch.is_whitespace()))
        .next()
        .unwrap_or_default()
        .trim()
}

/// Segment with the default rules
pub fn segment(raw_text: &str) -> Result<ParsedScript> {
    ScriptSegmenter::with_default_rules().segment(raw_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLE: &str = "The Night Watch \u{2013} Episode 4: Low Tide";

    fn script(blocks: &[&str]) -> String {
        blocks.join("\n\n\n\n")
    }

    fn speaker(name: &str) -> SectionKey {
        SectionKey::speaker(name)
    }

    #[test]
    fn test_podcast_name_prefers_en_dash() {
        let segmenter = ScriptSegmenter::default();
        assert_eq!(segmenter.podcast_name(TITLE).unwrap(), "The Night Watch");
        assert_eq!(
            segmenter.podcast_name("Well-Read \u{2013} Pilot").unwrap(),
            "Well-Read"
        );
        assert_eq!(segmenter.podcast_name("Deep Dive - Pilot").unwrap(), "Deep Dive");
    }

    #[test]
    fn test_podcast_name_requires_separator() {
        let segmenter = ScriptSegmenter::default();
        let err = segmenter.podcast_name("Just a title").unwrap_err();
        assert!(matches!(err, ScriptError::MalformedScript { .. }));

        let err = segmenter.podcast_name("\u{2013} Pilot").unwrap_err();
        assert!(matches!(err, ScriptError::MalformedScript { .. }));
    }

    #[test]
    fn test_empty_input_is_malformed() {
        assert!(matches!(segment(""), Err(ScriptError::MalformedScript { .. })));
        assert!(matches!(segment(" \n\n "), Err(ScriptError::MalformedScript { .. })));
    }

    #[test]
    fn test_single_block_is_malformed() {
        let text = format!("{TITLE}\n\nWritten by Someone\n\nJAMES\n\nHello.");
        let err = segment(&text).unwrap_err();
        match err {
            ScriptError::MalformedScript { reason } => assert!(reason.contains("block boundary")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_full_script_layout() {
        let text = script(&[
            TITLE,
            "Written by A. Writer\n\nDirected by B. Director",
            "Content Warnings\n\nStrong language\n\nPeril",
            "INT. LIGHTHOUSE \u{2013} NIGHT",
            "[waves crash][gull cries]",
            "JAMES\n\nThat's a damn shame.",
            "It really is.",
            "ROSE (V.O.)\n\nNo argument.\n\nNone at all.",
            "The Night Watch is a podcast distributed by Example Audio.\n\nThanks for listening.",
        ]);

        let parsed = segment(&text).unwrap();

        assert_eq!(
            parsed.get(&SectionKey::EpisodeInfo).unwrap(),
            &[
                TITLE.to_string(),
                "Written by A. Writer".to_string(),
                "Directed by B. Director".to_string(),
                "The Night Watch is a podcast distributed by Example Audio.".to_string(),
                "Thanks for listening.".to_string(),
            ]
        );
        assert_eq!(
            parsed.get(&SectionKey::ContentWarnings).unwrap(),
            &["Content Warnings".to_string(), "Strong language".to_string(), "Peril".to_string()]
        );
        assert_eq!(
            parsed.get(&SectionKey::Scenes).unwrap(),
            &["INT. LIGHTHOUSE \u{2013} NIGHT".to_string()]
        );
        assert_eq!(
            parsed.get(&SectionKey::Actions).unwrap(),
            &["[waves crash]".to_string(), "[gull cries]".to_string()]
        );
        assert_eq!(
            parsed.get(&speaker("JAMES")).unwrap(),
            &["That's a damn shame.".to_string(), "It really is.".to_string()]
        );
        assert_eq!(
            parsed.get(&speaker("ROSE")).unwrap(),
            &["No argument. None at all.".to_string()]
        );
        assert_eq!(parsed.speakers().collect::<Vec<_>>(), vec!["JAMES", "ROSE"]);
    }

    #[test]
    fn test_bracket_block_splits_into_actions() {
        let text = script(&[TITLE, "[door creaks][phone rings]"]);
        let parsed = segment(&text).unwrap();
        assert_eq!(
            parsed.get(&SectionKey::Actions).unwrap(),
            &["[door creaks]".to_string(), "[phone rings]".to_string()]
        );
    }

    #[test]
    fn test_action_block_drops_internal_paragraph_breaks() {
        let text = script(&[TITLE, "[door\n\n creaks]\n\n[phone rings]"]);
        let parsed = segment(&text).unwrap();
        assert_eq!(
            parsed.get(&SectionKey::Actions).unwrap(),
            &["[door creaks]".to_string(), "[phone rings]".to_string()]
        );
    }

    #[test]
    fn test_bracket_check_precedes_scene_check() {
        let text = script(&[TITLE, "INT. HALL \u{2013} DAY", "[CUT \u{2013} TO BLACK]"]);
        let parsed = segment(&text).unwrap();
        assert_eq!(
            parsed.get(&SectionKey::Actions).unwrap(),
            &["[CUT \u{2013} TO BLACK]".to_string()]
        );
        assert_eq!(parsed.get(&SectionKey::Scenes).unwrap().len(), 1);
    }

    #[test]
    fn test_without_warnings_marker_preamble_stays_episode_info() {
        let text = script(&[
            TITLE,
            "Cast list\n\nJAMES - Someone",
            "EXT. PIER - DAWN",
            "JAMES\n\nMorning.",
        ]);
        let parsed = segment(&text).unwrap();

        assert_eq!(parsed.get(&SectionKey::EpisodeInfo).unwrap().len(), 3);
        assert!(parsed.get(&SectionKey::ContentWarnings).unwrap().is_empty());
        assert_eq!(parsed.get(&SectionKey::Scenes).unwrap().len(), 1);
        assert_eq!(parsed.get(&speaker("JAMES")).unwrap(), &["Morning.".to_string()]);
    }

    #[test]
    fn test_marker_block_is_not_consumed_as_warning_text() {
        let text = script(&[
            TITLE,
            "Content Warnings\n\nLoud noises",
            "[thunder]",
            "ROSE\n\nThat was close.",
        ]);
        let parsed = segment(&text).unwrap();

        assert_eq!(
            parsed.get(&SectionKey::ContentWarnings).unwrap(),
            &["Content Warnings".to_string(), "Loud noises".to_string()]
        );
        assert_eq!(parsed.get(&SectionKey::Actions).unwrap(), &["[thunder]".to_string()]);
    }

    #[test]
    fn test_ending_info_is_absorbing() {
        let text = script(&[
            TITLE,
            "JAMES - Someone",
            "[static]",
            "JAMES\n\nSigning off.",
            "The Night Watch is a podcast distributed by Example Audio.",
            "Music by C. Composer",
            "JAMES\n\nOne more thing.",
            "[outro music]",
        ]);
        let parsed = segment(&text).unwrap();

        let info = parsed.get(&SectionKey::EpisodeInfo).unwrap();
        assert_eq!(info.len(), 6);
        assert_eq!(info[3], "Music by C. Composer");
        assert_eq!(info[4], "JAMES");
        assert_eq!(info[5], "One more thing.");
        assert_eq!(parsed.get(&speaker("JAMES")).unwrap(), &["Signing off.".to_string()]);
        // Bracket blocks still classify as actions after the closing boilerplate
        assert_eq!(
            parsed.get(&SectionKey::Actions).unwrap(),
            &["[static]".to_string(), "[outro music]".to_string()]
        );
    }

    #[test]
    fn test_continuation_without_speaker_is_an_error() {
        let text = script(&[TITLE, "[static]", "Is anyone there?"]);
        match segment(&text).unwrap_err() {
            ScriptError::UndefinedSpeaker { block_index, text } => {
                assert_eq!(block_index, 2);
                assert_eq!(text, "Is anyone there?");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_label_without_word_characters_is_an_error() {
        let text = script(&[TITLE, "[static]", "(V.O.)\n\nWho said that?"]);
        assert!(matches!(
            segment(&text),
            Err(ScriptError::UndefinedSpeaker { block_index: 2, .. })
        ));
    }

    #[test]
    fn test_label_only_block_establishes_speaker() {
        let text = script(&[TITLE, "[static]", "JAMES", "I was saying."]);
        let parsed = segment(&text).unwrap();
        assert_eq!(parsed.get(&speaker("JAMES")).unwrap(), &["I was saying.".to_string()]);
    }

    #[test]
    fn test_speaker_name_extraction() {
        assert_eq!(speaker_name("JAMES"), "JAMES");
        assert_eq!(speaker_name("ROSE (V.O.)"), "ROSE");
        assert_eq!(speaker_name("DR. O'BRIEN"), "DR");
        assert_eq!(speaker_name("MARY ANN: "), "MARY ANN");
        assert_eq!(speaker_name("(V.O.)"), "");
    }

    #[test]
    fn test_phase_transitions() {
        assert_eq!(Phase::BeginningInfo.enter_episode(), Phase::Body);
        assert_eq!(Phase::ContentWarnings.enter_episode(), Phase::Body);
        assert_eq!(Phase::EndingInfo.enter_episode(), Phase::EndingInfo);
        assert_eq!(Phase::Body.front_matter_section(), None);
        assert_eq!(
            Phase::EndingInfo.front_matter_section(),
            Some(SectionKey::EpisodeInfo)
        );
    }

    #[test]
    fn test_custom_rules() {
        let rules = SegmentationRules {
            content_warnings_marker: "CW:".to_string(),
            ..Default::default()
        };
        let segmenter = ScriptSegmenter::new(rules);
        let text = script(&[TITLE, "CW: language", "[beep]"]);
        let parsed = segmenter.segment(&text).unwrap();
        assert_eq!(
            parsed.get(&SectionKey::ContentWarnings).unwrap(),
            &["CW: language".to_string()]
        );
    }
}
