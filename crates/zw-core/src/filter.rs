use std::collections::BTreeSet;

use crate::entity::{Event, Location, Traveler, normalize_tags};
use crate::error::{ZwError, ZwResult};
use crate::journey::Journey;
use crate::position::{Position, PositionalRange};

/// Every filter the system supports, as one explicit options struct.
///
/// Filters compose by intersection: an entity survives only if it matches
/// every filter that is set. Which keys a given entity kind can consume is
/// decided by the `filter_*` functions; asking for a journey filter over
/// spanning entities (or a span filter over travelers) is an
/// unsupported-filter error, as is an unrecognized key in
/// [`FilterOptions::parse_pairs`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    /// Exact name match (case-insensitive).
    pub name_is: Option<String>,
    /// Name substring match (case-insensitive).
    pub name_contains: Option<String>,
    /// Entity must carry every one of these tags.
    pub tagged_all: Option<BTreeSet<String>>,
    /// Entity must carry at least one of these tags.
    pub tagged_any: Option<BTreeSet<String>>,
    /// Entity must carry no tags outside this set.
    pub tagged_only: Option<BTreeSet<String>>,
    /// Entity must carry none of these tags.
    pub tagged_none: Option<BTreeSet<String>>,
    /// Span must include this position.
    pub span_includes: Option<Position>,
    /// Span must intersect this range.
    pub span_intersects: Option<PositionalRange>,
    /// Journey must land exactly on this position.
    pub journey_includes: Option<Position>,
    /// Journey must land inside this range.
    pub journey_intersects: Option<PositionalRange>,
}

impl FilterOptions {
    /// No filters: everything matches.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse filters from raw `key=value` pairs (as supplied on a command
    /// line or query string). Unknown keys are rejected.
    ///
    /// Tag values are comma-separated lists; position and range values are
    /// JSON objects.
    pub fn parse_pairs<I, S>(pairs: I) -> ZwResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ZwError::UnsupportedFilter(pair.to_string()))?;
            match key {
                "name_is" => options.name_is = Some(value.to_string()),
                "name_contains" => options.name_contains = Some(value.to_string()),
                "tagged_all" => options.tagged_all = Some(parse_tags(value)),
                "tagged_any" => options.tagged_any = Some(parse_tags(value)),
                "tagged_only" => options.tagged_only = Some(parse_tags(value)),
                "tagged_none" => options.tagged_none = Some(parse_tags(value)),
                "span_includes" => options.span_includes = Some(parse_json(key, value)?),
                "span_intersects" => options.span_intersects = Some(parse_json(key, value)?),
                "journey_includes" => options.journey_includes = Some(parse_json(key, value)?),
                "journey_intersects" => {
                    options.journey_intersects = Some(parse_json(key, value)?);
                }
                other => return Err(ZwError::UnsupportedFilter(other.to_string())),
            }
        }
        Ok(options)
    }

    /// Exact name filter.
    pub fn with_name_is(mut self, name: impl Into<String>) -> Self {
        self.name_is = Some(name.into());
        self
    }

    /// Name substring filter.
    pub fn with_name_contains(mut self, fragment: impl Into<String>) -> Self {
        self.name_contains = Some(fragment.into());
        self
    }

    /// Require every listed tag.
    pub fn with_tagged_all(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tagged_all = Some(normalize_tags(tags));
        self
    }

    /// Require at least one listed tag.
    pub fn with_tagged_any(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tagged_any = Some(normalize_tags(tags));
        self
    }

    /// Forbid tags outside the listed set.
    pub fn with_tagged_only(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tagged_only = Some(normalize_tags(tags));
        self
    }

    /// Forbid every listed tag.
    pub fn with_tagged_none(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tagged_none = Some(normalize_tags(tags));
        self
    }

    /// Require the span to include a position.
    pub fn with_span_includes(mut self, position: Position) -> Self {
        self.span_includes = Some(position);
        self
    }

    /// Require the span to intersect a range.
    pub fn with_span_intersects(mut self, range: PositionalRange) -> Self {
        self.span_intersects = Some(range);
        self
    }

    /// Require the journey to land on a position.
    pub fn with_journey_includes(mut self, position: Position) -> Self {
        self.journey_includes = Some(position);
        self
    }

    /// Require the journey to land inside a range.
    pub fn with_journey_intersects(mut self, range: PositionalRange) -> Self {
        self.journey_intersects = Some(range);
        self
    }

    fn matches_name(&self, name: &str) -> bool {
        if let Some(expected) = &self.name_is
            && !name.eq_ignore_ascii_case(expected)
        {
            return false;
        }
        if let Some(fragment) = &self.name_contains
            && !name.to_lowercase().contains(&fragment.to_lowercase())
        {
            return false;
        }
        true
    }

    fn matches_tags(&self, tags: &BTreeSet<String>) -> bool {
        if let Some(required) = &self.tagged_all
            && !required.is_subset(tags)
        {
            return false;
        }
        if let Some(wanted) = &self.tagged_any
            && wanted.is_disjoint(tags)
        {
            return false;
        }
        if let Some(allowed) = &self.tagged_only
            && !tags.is_subset(allowed)
        {
            return false;
        }
        if let Some(forbidden) = &self.tagged_none
            && !forbidden.is_disjoint(tags)
        {
            return false;
        }
        true
    }

    fn matches_span(&self, span: &PositionalRange) -> bool {
        if let Some(position) = self.span_includes
            && !span.includes(position)
        {
            return false;
        }
        if let Some(range) = &self.span_intersects
            && !span.intersects(range)
        {
            return false;
        }
        true
    }

    fn matches_journey(&self, journey: &Journey) -> bool {
        if let Some(position) = self.journey_includes
            && !journey.includes(position)
        {
            return false;
        }
        if let Some(range) = &self.journey_intersects
            && !journey.intersects(range)
        {
            return false;
        }
        true
    }

    fn reject_span_filters(&self) -> ZwResult<()> {
        if self.span_includes.is_some() {
            return Err(ZwError::UnsupportedFilter("span_includes".into()));
        }
        if self.span_intersects.is_some() {
            return Err(ZwError::UnsupportedFilter("span_intersects".into()));
        }
        Ok(())
    }

    fn reject_journey_filters(&self) -> ZwResult<()> {
        if self.journey_includes.is_some() {
            return Err(ZwError::UnsupportedFilter("journey_includes".into()));
        }
        if self.journey_intersects.is_some() {
            return Err(ZwError::UnsupportedFilter("journey_intersects".into()));
        }
        Ok(())
    }
}

fn parse_tags(value: &str) -> BTreeSet<String> {
    normalize_tags(value.split(',').map(str::to_string))
}

fn parse_json<T: serde::de::DeserializeOwned>(key: &str, value: &str) -> ZwResult<T> {
    serde_json::from_str(value)
        .map_err(|e| ZwError::Validation(format!("filter {key} has a malformed value: {e}")))
}

/// Filter locations. Journey filters are unsupported for spanning entities.
pub fn filter_locations<'a, I>(locations: I, options: &FilterOptions) -> ZwResult<Vec<&'a Location>>
where
    I: IntoIterator<Item = &'a Location>,
{
    options.reject_journey_filters()?;
    Ok(locations
        .into_iter()
        .filter(|l| {
            options.matches_name(&l.name)
                && options.matches_tags(&l.tags)
                && options.matches_span(&l.span)
        })
        .collect())
}

/// Filter travelers. Span filters are unsupported for journeying entities.
pub fn filter_travelers<'a, I>(travelers: I, options: &FilterOptions) -> ZwResult<Vec<&'a Traveler>>
where
    I: IntoIterator<Item = &'a Traveler>,
{
    options.reject_span_filters()?;
    Ok(travelers
        .into_iter()
        .filter(|t| {
            options.matches_name(&t.name)
                && options.matches_tags(&t.tags)
                && options.matches_journey(&t.journey)
        })
        .collect())
}

/// Filter events. Journey filters are unsupported for spanning entities.
pub fn filter_events<'a, I>(events: I, options: &FilterOptions) -> ZwResult<Vec<&'a Event>>
where
    I: IntoIterator<Item = &'a Event>,
{
    options.reject_journey_filters()?;
    Ok(events
        .into_iter()
        .filter(|e| {
            options.matches_name(&e.name)
                && options.matches_tags(&e.tags)
                && options.matches_span(&e.span)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::PositionalMove;
    use crate::range::Range;

    fn span(reality: i64) -> PositionalRange {
        PositionalRange::new(
            Range::new(-10.0, 10.0).unwrap(),
            Range::new(-10.0, 10.0).unwrap(),
            Range::new(-10.0, 10.0).unwrap(),
            Range::new(0.0, 100.0).unwrap(),
            [reality],
        )
        .unwrap()
    }

    fn locations() -> Vec<Location> {
        vec![
            Location::new("The Iron Bazaar", span(0))
                .unwrap()
                .with_tags(["market".to_string(), "city".to_string()]),
            Location::new("The Shifting Mire", span(1))
                .unwrap()
                .with_tags(["swamp".to_string()]),
            Location::new("Bazaar Annex", span(0)).unwrap(),
        ]
    }

    #[test]
    fn name_filters_are_case_insensitive() {
        let all = locations();
        let options = FilterOptions::none().with_name_is("the iron bazaar");
        let hits = filter_locations(&all, &options).unwrap();
        assert_eq!(hits.len(), 1);

        let options = FilterOptions::none().with_name_contains("BAZAAR");
        let hits = filter_locations(&all, &options).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn tag_filters_compose_by_intersection() {
        let all = locations();
        let options = FilterOptions::none()
            .with_tagged_any(["market".to_string(), "swamp".to_string()])
            .with_tagged_none(["city".to_string()]);
        let hits = filter_locations(&all, &options).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "The Shifting Mire");
    }

    #[test]
    fn tagged_all_and_only_semantics() {
        let all = locations();
        let options =
            FilterOptions::none().with_tagged_all(["market".to_string(), "city".to_string()]);
        assert_eq!(filter_locations(&all, &options).unwrap().len(), 1);

        // tagged_only admits untagged entities as well.
        let options = FilterOptions::none().with_tagged_only(["swamp".to_string()]);
        let hits = filter_locations(&all, &options).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn span_filters_narrow_by_geometry() {
        let all = locations();
        let inside_reality_one = Position::new(0.0, 0.0, 0.0, 50.0, 1);
        let options = FilterOptions::none().with_span_includes(inside_reality_one);
        let hits = filter_locations(&all, &options).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "The Shifting Mire");
    }

    #[test]
    fn journey_filters_rejected_for_spanning_entities() {
        let all = locations();
        let options =
            FilterOptions::none().with_journey_includes(Position::new(0.0, 0.0, 0.0, 0.0, 0));
        assert_eq!(
            filter_locations(&all, &options).unwrap_err(),
            ZwError::UnsupportedFilter("journey_includes".into())
        );
    }

    #[test]
    fn span_filters_rejected_for_travelers() {
        let journey = Journey::new(vec![PositionalMove::immediate(Position::new(
            0.0, 0.0, 0.0, 0.0, 0,
        ))])
        .unwrap();
        let travelers = vec![Traveler::new("Wanderer", journey).unwrap()];
        let options = FilterOptions::none().with_span_intersects(span(0));
        assert_eq!(
            filter_travelers(&travelers, &options).unwrap_err(),
            ZwError::UnsupportedFilter("span_intersects".into())
        );
    }

    #[test]
    fn traveler_journey_filters() {
        let journey = Journey::new(vec![
            PositionalMove::immediate(Position::new(0.0, 0.0, 0.0, 0.0, 0)),
            PositionalMove::interpolated(Position::new(5.0, 5.0, 0.0, 10.0, 0)),
        ])
        .unwrap();
        let travelers = vec![Traveler::new("Wanderer", journey).unwrap()];

        let options = FilterOptions::none().with_journey_intersects(span(0));
        assert_eq!(filter_travelers(&travelers, &options).unwrap().len(), 1);

        let options = FilterOptions::none().with_journey_intersects(span(3));
        assert!(filter_travelers(&travelers, &options).unwrap().is_empty());
    }

    #[test]
    fn parse_pairs_builds_options() {
        let options = FilterOptions::parse_pairs([
            "name_contains=bazaar",
            "tagged_any=Market, swamp",
            r#"span_includes={"latitude": 0.0, "longitude": 0.0, "altitude": 0.0,
                              "continuum": 50.0, "reality": 0}"#,
        ])
        .unwrap();
        assert_eq!(options.name_contains.as_deref(), Some("bazaar"));
        assert_eq!(
            options.tagged_any,
            Some(BTreeSet::from(["market".to_string(), "swamp".to_string()]))
        );
        assert!(options.span_includes.is_some());
    }

    #[test]
    fn parse_pairs_rejects_unknown_keys() {
        assert_eq!(
            FilterOptions::parse_pairs(["haunted=yes"]).unwrap_err(),
            ZwError::UnsupportedFilter("haunted".into())
        );
        assert_eq!(
            FilterOptions::parse_pairs(["no-equals-sign"]).unwrap_err(),
            ZwError::UnsupportedFilter("no-equals-sign".into())
        );
    }

    #[test]
    fn parse_pairs_rejects_malformed_values() {
        assert!(matches!(
            FilterOptions::parse_pairs(["span_includes=not json"]),
            Err(ZwError::Validation(_))
        ));
    }
}
