//! Server parameter update record and `name=value` assignment.
//!
//! Operators pass parameter changes as a single comma-separated list such as
//! `NT=5,ADATCP=on,OPTIONS=(TRUNCATION,XA),type=dynamic`. The list is applied
//! to a [`ParameterUpdate`] through an explicit name-to-field dispatch. Each
//! field declares its kind, and the kind decides how the text is coerced.

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{ParameterError, ParameterResult};

/// OPTIONS value understood by the server as "clear every option".
pub const CLEAR_OPTIONS: &str = " ";

/// Which parameter set an update targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterMode {
    /// Persistent configuration applied at the next nucleus start.
    #[default]
    Static,
    /// Online settings of the running nucleus.
    Dynamic,
}

impl ParameterMode {
    /// Wire representation of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
        }
    }

    /// Strictly parse `static` or `dynamic`, ignoring case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("static") {
            Some(Self::Static)
        } else if value.eq_ignore_ascii_case("dynamic") {
            Some(Self::Dynamic)
        } else {
            None
        }
    }
}

/// Value kind of a parameter field, which selects its coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Base-10 signed integer; unparsable text is rejected.
    Integer,
    /// `on`, `yes` or `true` (any case) is true; anything else is false.
    Boolean,
    /// Assigned verbatim.
    Text,
}

/// Parameter changes sent to the server in a single update request.
///
/// Serializes to the query pairs of the update endpoint; unset fields are
/// omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct ParameterUpdate {
    /// Target parameter set.
    #[serde(rename = "type")]
    pub mode: ParameterMode,
    /// Comma-separated OPTIONS list, or a single space to clear every option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    /// Number of threads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nt: Option<i64>,
    /// Transaction time limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tt: Option<i64>,
    /// Number of user queue elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nu: Option<i64>,
    /// Number of command log entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ncl: Option<i64>,
    /// ISNs held per user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nisnhq: Option<i64>,
    /// Non-activity limit for ET users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tnae: Option<i64>,
    /// Non-activity limit for access-only users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tnaa: Option<i64>,
    /// Non-activity limit for exclusive users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tnax: Option<i64>,
    /// Attached buffer size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lab: Option<i64>,
    /// Extended attached buffer size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labx: Option<i64>,
    /// Buffer pool size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lbp: Option<i64>,
    /// Work pool size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lwp: Option<i64>,
    /// Replication pool size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lpxa: Option<i64>,
    /// ADATCP listener port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adatcpport: Option<i64>,
    /// ADATCP receiver threads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adatcpreceiver: Option<i64>,
    /// ADATCP attached buffer size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adatcpatb: Option<i64>,
    /// Maximum ADATCP connections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adatcpconnections: Option<i64>,
    /// TLS peer verification level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sslverify: Option<i64>,
    /// Parallel processing units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apuunits: Option<i64>,
    /// Receivers per processing unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apurecvs: Option<i64>,
    /// Workers per processing unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apuworkers: Option<i64>,
    /// TLS listener port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sslport: Option<i64>,
    /// Replication block count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rplblocks: Option<i64>,
    /// Replication total size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpltotal: Option<i64>,
    /// Replication record count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rplrecords: Option<i64>,
    /// Buffer pool write limit in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writelimit: Option<i64>,
    /// Enable the ADATCP listener.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adatcp: Option<bool>,
    /// Enable protection logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plog: Option<bool>,
    /// Enable before-image logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bi: Option<bool>,
    /// Auto-restart conflict handling (`CONTINUE` or `ABORT`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ar: Option<String>,
    /// Command time limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ct: Option<String>,
    /// Command logging buffer list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<String>,
    /// Enabled user exits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userexits: Option<String>,
}

enum FieldSlot<'a> {
    Integer(&'a mut Option<i64>),
    Boolean(&'a mut Option<bool>),
    Text(&'a mut Option<String>),
}

impl FieldSlot<'_> {
    const fn kind(&self) -> FieldKind {
        match self {
            Self::Integer(_) => FieldKind::Integer,
            Self::Boolean(_) => FieldKind::Boolean,
            Self::Text(_) => FieldKind::Text,
        }
    }
}

enum Tokenizer {
    Outside,
    BufferingOptions { buffer: String },
}

impl ParameterUpdate {
    /// Build an update from a `name=value` list.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] when a segment is malformed, an integer field
    /// receives a non-numeric value, or an OPTIONS list is never closed.
    pub fn parse(raw: &str) -> ParameterResult<Self> {
        let mut update = Self::default();
        update.apply(raw)?;
        Ok(update)
    }

    /// Apply a `name=value` list on top of the current record.
    ///
    /// Segments are processed left to right and processing stops at the first
    /// failure; segments before it stay applied. Unknown names are ignored. When
    /// a field is named twice the first value is kept, while OPTIONS always takes
    /// the latest list.
    ///
    /// # Errors
    ///
    /// See [`ParameterUpdate::parse`].
    pub fn apply(&mut self, raw: &str) -> ParameterResult<()> {
        let mut state = Tokenizer::Outside;
        for segment in raw.split(',') {
            trace!(segment, "applying parameter segment");
            state = match state {
                Tokenizer::Outside => self.assign_segment(segment)?,
                Tokenizer::BufferingOptions { mut buffer } => {
                    buffer.push(',');
                    if segment.contains(')') {
                        buffer.push_str(&segment.replacen(')', "", 1));
                        self.complete_options(&buffer);
                        Tokenizer::Outside
                    } else {
                        buffer.push_str(segment);
                        Tokenizer::BufferingOptions { buffer }
                    }
                }
            };
        }

        match state {
            Tokenizer::Outside => Ok(()),
            Tokenizer::BufferingOptions { buffer } => {
                Err(ParameterError::UnterminatedOptions { partial: buffer })
            }
        }
    }

    /// Kind of the named field, after normalization, if the schema knows it.
    #[must_use]
    pub fn field_kind(name: &str) -> Option<FieldKind> {
        Self::default()
            .slot(&normalize_name(name))
            .map(|slot| slot.kind())
    }

    fn assign_segment(&mut self, segment: &str) -> ParameterResult<Tokenizer> {
        let mut parts = segment.split('=');
        let (Some(name), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParameterError::MalformedParameter {
                raw: segment.to_string(),
            });
        };

        if name.eq_ignore_ascii_case("type") {
            self.mode = if value.eq_ignore_ascii_case("dynamic") {
                ParameterMode::Dynamic
            } else {
                ParameterMode::Static
            };
            return Ok(Tokenizer::Outside);
        }

        let field = normalize_name(name);
        if field == "OPTIONS" {
            let value = value.strip_prefix('(').unwrap_or(value);
            if value.contains(')') {
                self.complete_options(&value.replacen(')', "", 1));
                return Ok(Tokenizer::Outside);
            }
            return Ok(Tokenizer::BufferingOptions {
                buffer: value.to_string(),
            });
        }

        let Some(slot) = self.slot(&field) else {
            debug!(parameter = name, "ignoring unknown parameter");
            return Ok(Tokenizer::Outside);
        };
        match slot {
            FieldSlot::Integer(target) => {
                let parsed = value
                    .parse::<i64>()
                    .map_err(|_| ParameterError::InvalidValue {
                        field: name.to_string(),
                        raw: value.to_string(),
                    })?;
                if target.is_none() {
                    *target = Some(parsed);
                }
            }
            FieldSlot::Boolean(target) => {
                if target.is_none() {
                    *target = Some(parse_switch(value));
                }
            }
            FieldSlot::Text(target) => {
                if target.is_none() {
                    *target = Some(value.to_string());
                }
            }
        }
        Ok(Tokenizer::Outside)
    }

    /// Stores the list exactly as typed; only an empty `()` clears every option.
    fn complete_options(&mut self, list: &str) {
        let options = if list.is_empty() { CLEAR_OPTIONS } else { list };
        debug!(options, "collected OPTIONS list");
        self.options = Some(options.to_string());
    }

    fn slot(&mut self, field: &str) -> Option<FieldSlot<'_>> {
        let slot = match field {
            "NT" => FieldSlot::Integer(&mut self.nt),
            "TT" => FieldSlot::Integer(&mut self.tt),
            "NU" => FieldSlot::Integer(&mut self.nu),
            "NCL" => FieldSlot::Integer(&mut self.ncl),
            "NISNHQ" => FieldSlot::Integer(&mut self.nisnhq),
            "TNAE" => FieldSlot::Integer(&mut self.tnae),
            "TNAA" => FieldSlot::Integer(&mut self.tnaa),
            "TNAX" => FieldSlot::Integer(&mut self.tnax),
            "LAB" => FieldSlot::Integer(&mut self.lab),
            "LABX" => FieldSlot::Integer(&mut self.labx),
            "LBP" => FieldSlot::Integer(&mut self.lbp),
            "LWP" => FieldSlot::Integer(&mut self.lwp),
            "LPXA" => FieldSlot::Integer(&mut self.lpxa),
            "ADATCPPORT" => FieldSlot::Integer(&mut self.adatcpport),
            "ADATCPRECEIVER" => FieldSlot::Integer(&mut self.adatcpreceiver),
            "ADATCPATB" => FieldSlot::Integer(&mut self.adatcpatb),
            "ADATCPCONNECTIONS" => FieldSlot::Integer(&mut self.adatcpconnections),
            "SSLVERIFY" => FieldSlot::Integer(&mut self.sslverify),
            "APUUNITS" => FieldSlot::Integer(&mut self.apuunits),
            "APURECVS" => FieldSlot::Integer(&mut self.apurecvs),
            "APUWORKERS" => FieldSlot::Integer(&mut self.apuworkers),
            "SSLPORT" => FieldSlot::Integer(&mut self.sslport),
            "RPLBLOCKS" => FieldSlot::Integer(&mut self.rplblocks),
            "RPLTOTAL" => FieldSlot::Integer(&mut self.rpltotal),
            "RPLRECORDS" => FieldSlot::Integer(&mut self.rplrecords),
            "WRITELIMIT" => FieldSlot::Integer(&mut self.writelimit),
            "ADATCP" => FieldSlot::Boolean(&mut self.adatcp),
            "PLOG" => FieldSlot::Boolean(&mut self.plog),
            "BI" => FieldSlot::Boolean(&mut self.bi),
            "AR" => FieldSlot::Text(&mut self.ar),
            "CT" => FieldSlot::Text(&mut self.ct),
            "LOGGING" => FieldSlot::Text(&mut self.logging),
            "USEREXITS" => FieldSlot::Text(&mut self.userexits),
            _ => return None,
        };
        Some(slot)
    }
}

/// Strip `_` separators and upper-case, so `write_limit` addresses `WRITELIMIT`.
fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|ch| *ch != '_')
        .map(|ch| ch.to_ascii_uppercase())
        .collect()
}

fn parse_switch(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "on" | "yes" | "true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_boolean_fields_are_coerced() -> ParameterResult<()> {
        let update = ParameterUpdate::parse("NT=5,ADATCP=on")?;
        assert_eq!(update.nt, Some(5));
        assert_eq!(update.adatcp, Some(true));
        assert_eq!(update.mode, ParameterMode::Static);
        Ok(())
    }

    #[test]
    fn type_selects_mode_without_touching_fields() -> ParameterResult<()> {
        let update = ParameterUpdate::parse("type=DYNAMIC")?;
        assert_eq!(update.mode, ParameterMode::Dynamic);
        assert_eq!(
            update,
            ParameterUpdate {
                mode: ParameterMode::Dynamic,
                ..ParameterUpdate::default()
            }
        );

        let update = ParameterUpdate::parse("type=dynamic,TYPE=whatever")?;
        assert_eq!(update.mode, ParameterMode::Static);
        Ok(())
    }

    #[test]
    fn options_list_keeps_inner_commas() -> ParameterResult<()> {
        let update = ParameterUpdate::parse("OPTIONS=(A,B)")?;
        assert_eq!(update.options.as_deref(), Some("A,B"));

        let update = ParameterUpdate::parse("NT=3,OPTIONS=(TRUNCATION,XA,READ_ONLY),PLOG=yes")?;
        assert_eq!(update.options.as_deref(), Some("TRUNCATION,XA,READ_ONLY"));
        assert_eq!(update.nt, Some(3));
        assert_eq!(update.plog, Some(true));
        Ok(())
    }

    #[test]
    fn single_segment_options_complete_immediately() -> ParameterResult<()> {
        let update = ParameterUpdate::parse("OPTIONS=(XA)")?;
        assert_eq!(update.options.as_deref(), Some("XA"));

        let update = ParameterUpdate::parse("OPTIONS=()")?;
        assert_eq!(update.options.as_deref(), Some(" "));
        Ok(())
    }

    #[test]
    fn options_content_is_stored_as_typed() -> ParameterResult<()> {
        let update = ParameterUpdate::parse("OPTIONS=(1024)")?;
        assert_eq!(update.options.as_deref(), Some("1024"));

        let update = ParameterUpdate::parse("OPTIONS=(65)")?;
        assert_eq!(update.options.as_deref(), Some("65"));

        let update = ParameterUpdate::parse("OPTIONS=( A , B )")?;
        assert_eq!(update.options.as_deref(), Some(" A , B "));
        Ok(())
    }

    #[test]
    fn unterminated_options_are_rejected() {
        let err = ParameterUpdate::parse("OPTIONS=(A,B").err();
        assert_eq!(
            err,
            Some(ParameterError::UnterminatedOptions {
                partial: "A,B".to_string()
            })
        );
    }

    #[test]
    fn segments_inside_options_skip_assignment_checks() -> ParameterResult<()> {
        let update = ParameterUpdate::parse("OPTIONS=(A,NT=5),TT=9")?;
        assert_eq!(update.options.as_deref(), Some("A,NT=5"));
        assert_eq!(update.nt, None);
        assert_eq!(update.tt, Some(9));
        Ok(())
    }

    #[test]
    fn malformed_segment_stops_processing() {
        let err = ParameterUpdate::parse("badtoken").err();
        assert_eq!(
            err,
            Some(ParameterError::MalformedParameter {
                raw: "badtoken".to_string()
            })
        );

        let mut update = ParameterUpdate::default();
        let err = update.apply("NT=4,a=b=c,TT=2").err();
        assert!(matches!(err, Some(ParameterError::MalformedParameter { raw }) if raw == "a=b=c"));
        assert_eq!(update.nt, Some(4));
        assert_eq!(update.tt, None);
    }

    #[test]
    fn invalid_integer_stops_processing_after_earlier_fields() {
        let mut update = ParameterUpdate::default();
        let err = update.apply("NT=4,TT=x,NU=5").err();
        assert_eq!(
            err,
            Some(ParameterError::InvalidValue {
                field: "TT".to_string(),
                raw: "x".to_string()
            })
        );
        assert_eq!(update.nt, Some(4));
        assert_eq!(update.tt, None);
        assert_eq!(update.nu, None);
    }

    #[test]
    fn empty_input_is_malformed() {
        assert!(matches!(
            ParameterUpdate::parse(""),
            Err(ParameterError::MalformedParameter { raw }) if raw.is_empty()
        ));
    }

    #[test]
    fn invalid_integer_reports_field_as_typed() {
        let err = ParameterUpdate::parse("NT=abc").err();
        assert_eq!(
            err,
            Some(ParameterError::InvalidValue {
                field: "NT".to_string(),
                raw: "abc".to_string()
            })
        );
    }

    #[test]
    fn names_are_normalized_before_lookup() -> ParameterResult<()> {
        let update = ParameterUpdate::parse("write_limit=40,adatcp_port=7000")?;
        assert_eq!(update.writelimit, Some(40));
        assert_eq!(update.adatcpport, Some(7000));
        assert_eq!(
            ParameterUpdate::parse("writelimit=40")?.writelimit,
            update.writelimit
        );
        Ok(())
    }

    #[test]
    fn unknown_names_are_ignored() -> ParameterResult<()> {
        let update = ParameterUpdate::parse("NOSUCHFIELD=1")?;
        assert_eq!(update, ParameterUpdate::default());
        Ok(())
    }

    #[test]
    fn booleans_never_fail() -> ParameterResult<()> {
        let update = ParameterUpdate::parse("PLOG=YES,BI=maybe,ADATCP=True")?;
        assert_eq!(update.plog, Some(true));
        assert_eq!(update.bi, Some(false));
        assert_eq!(update.adatcp, Some(true));
        Ok(())
    }

    #[test]
    fn text_fields_are_verbatim() -> ParameterResult<()> {
        let update = ParameterUpdate::parse("AR=CONTINUE,LOGGING=cb+fb")?;
        assert_eq!(update.ar.as_deref(), Some("CONTINUE"));
        assert_eq!(update.logging.as_deref(), Some("cb+fb"));
        Ok(())
    }

    #[test]
    fn first_assignment_of_a_field_wins() -> ParameterResult<()> {
        let update = ParameterUpdate::parse("NT=5,NT=6,OPTIONS=(A),OPTIONS=(B)")?;
        assert_eq!(update.nt, Some(5));
        assert_eq!(update.options.as_deref(), Some("B"));
        Ok(())
    }

    #[test]
    fn field_kinds_follow_schema() {
        assert_eq!(ParameterUpdate::field_kind("NT"), Some(FieldKind::Integer));
        assert_eq!(
            ParameterUpdate::field_kind("write_limit"),
            Some(FieldKind::Integer)
        );
        assert_eq!(ParameterUpdate::field_kind("plog"), Some(FieldKind::Boolean));
        assert_eq!(ParameterUpdate::field_kind("USEREXITS"), Some(FieldKind::Text));
        assert_eq!(ParameterUpdate::field_kind("OPTIONS"), None);
        assert_eq!(ParameterUpdate::field_kind("unknown"), None);
    }

    #[test]
    fn mode_parsing_is_strict() {
        assert_eq!(ParameterMode::parse("Static"), Some(ParameterMode::Static));
        assert_eq!(ParameterMode::parse("DYNAMIC"), Some(ParameterMode::Dynamic));
        assert_eq!(ParameterMode::parse("online"), None);
        assert_eq!(ParameterMode::Dynamic.as_str(), "dynamic");
    }
}
