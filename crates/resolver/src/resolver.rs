//! Face selection and coordinate clamping.

use std::{
    cmp::{Ordering, Reverse},
    sync::Arc,
};

use log::{debug, trace};
use read_fonts::types::Tag;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    catalog::{FontCatalog, FontFace},
    config::{DEFAULT_STRETCH, DEFAULT_WEIGHT, EngineConfig},
    coverage::{FontFlags, is_default_ignorable},
    coords::{AxisCoordinates, FontInstanceKey},
    error::{Error, Result},
    mapper::SemanticMapper,
    registry::{AxisRegistry, SemanticRole, WDTH, WGHT},
    request::StyleRequest,
    variant::FontStyle,
};

/// How close a fallback candidate is to the face it stands in for.
///
/// Lower is better: matching monospace, then matching serifs, then more
/// leading family words in common, then the shorter (less specialized)
/// family name. "Noto Sans Arabic" beats "IBM Plex Arabic" next to
/// "Noto Sans".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LikeScore {
    pub monospace_mismatch: bool,
    pub serif_mismatch: bool,
    pub shared_words: Reverse<usize>,
    pub family_len: usize,
}

impl LikeScore {
    pub fn new(like: &FontFace, face: &FontFace) -> Self {
        let differs = |flag| face.flags().contains(flag) != like.flags().contains(flag);
        Self {
            monospace_mismatch: differs(FontFlags::MONOSPACE),
            serif_mismatch: differs(FontFlags::SERIF),
            shared_words: Reverse(shared_prefix_words(face.family(), like.family())),
            family_len: face.family().len(),
        }
    }
}

/// Number of leading words two names have in common.
pub fn shared_prefix_words(left: &str, right: &str) -> usize {
    left.unicode_words().zip(right.unicode_words()).take_while(|(l, r)| l == r).count()
}

/// How far a face is from a request. Lower is better, compared field by field.
///
/// `like` only takes part in fallback selection and ranks above everything
/// else there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceScore {
    pub like: Option<LikeScore>,
    pub style: u16,
    pub stretch: f32,
    pub weight: f32,
}

impl FaceScore {
    /// Score `face` against the nominal attributes of `request`.
    ///
    /// A variable face scores zero on any attribute its axes can reach, so it
    /// beats static faces that would need a different nominal style.
    pub fn new(registry: &AxisRegistry, face: &FontFace, request: &StyleRequest) -> Self {
        let weight = target(request, WGHT, request.weight, DEFAULT_WEIGHT);
        let stretch = target(request, WDTH, request.stretch, DEFAULT_STRETCH);
        let axes = face.axes();
        let nominal = face.style();

        let weight_distance = match axes.find_role(registry, SemanticRole::Weight) {
            Some((_, range)) => range.distance(weight),
            None => (nominal.weight - weight).abs(),
        };
        let stretch_distance = match axes.find_role(registry, SemanticRole::Width) {
            Some((_, range)) => range.distance(stretch),
            None => (nominal.stretch - stretch).abs(),
        };

        Self {
            like: None,
            style: style_distance(registry, face, request.font_style()),
            stretch: stretch_distance,
            weight: weight_distance,
        }
    }

    /// Also rank `face` by its likeness to `like`.
    pub fn with_like(mut self, like: &FontFace, face: &FontFace) -> Self {
        self.like = Some(LikeScore::new(like, face));
        self
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        self.like
            .cmp(&other.like)
            .then_with(|| self.style.cmp(&other.style))
            .then_with(|| self.stretch.total_cmp(&other.stretch))
            .then_with(|| self.weight.total_cmp(&other.weight))
    }
}

fn target(request: &StyleRequest, tag: Tag, field: Option<f32>, default: f32) -> f32 {
    request
        .extra_axes
        .get(&tag)
        .copied()
        .or(field)
        .filter(|value| value.is_finite())
        .unwrap_or(default)
}

fn style_distance(registry: &AxisRegistry, face: &FontFace, wanted: FontStyle) -> u16 {
    let nominal = face.style().style;
    if nominal == wanted {
        return 0;
    }

    let axes = face.axes();
    if axes.find_role(registry, SemanticRole::ItalicToggle).is_some()
        && matches!((nominal, wanted), (FontStyle::Normal, _) | (FontStyle::Italic, FontStyle::Normal))
    {
        return 0;
    }
    if let Some((_, range)) = axes.find_role(registry, SemanticRole::Slant)
        && range.min() < 0.0
        && nominal == FontStyle::Normal
    {
        return 0;
    }

    nominal.distance(wanted)
}

/// Picks the best face of a family and produces its clamped coordinates.
#[derive(Debug, Clone)]
pub struct InstanceResolver {
    catalog: Arc<FontCatalog>,
    mapper: SemanticMapper<'static>,
}

impl InstanceResolver {
    pub fn new(catalog: Arc<FontCatalog>, config: &EngineConfig) -> Self {
        Self { catalog, mapper: SemanticMapper::new(config) }
    }

    pub fn catalog(&self) -> &Arc<FontCatalog> {
        &self.catalog
    }

    /// Resolve `request` against the faces of `family`.
    ///
    /// # Errors
    ///
    /// - `Error::NoMatchingFace` if the family has no faces
    pub fn resolve(&self, family: &str, request: &StyleRequest) -> Result<FontInstanceKey> {
        let face = self.select(family, request)?;
        let key = self.key_for(face, request);
        debug!("resolved '{family}' to {} [{}]", key.face_id(), key.coords());
        Ok(key)
    }

    /// Resolve using the request's own family name.
    pub fn resolve_request(&self, request: &StyleRequest) -> Result<FontInstanceKey> {
        self.resolve(&request.family, request)
    }

    /// The highest scoring face of `family`. Ties keep the earlier face.
    pub fn select(&self, family: &str, request: &StyleRequest) -> Result<Arc<FontFace>> {
        let registry = self.mapper.registry();
        let mut best: Option<(&Arc<FontFace>, FaceScore)> = None;

        for face in self.catalog.faces_for(family) {
            let score = FaceScore::new(registry, face, request);
            trace!("{}: {score:?}", face.id());
            if best.is_none_or(|(_, best_score)| score.compare(&best_score).is_lt()) {
                best = Some((face, score));
            }
        }

        best.map(|(face, _)| Arc::clone(face))
            .ok_or_else(|| Error::NoMatchingFace { family: family.to_string() })
    }

    /// Resolve a face able to render `text`, closest to `like` and then to
    /// `request`. The family named in `request` is ignored.
    ///
    /// # Errors
    ///
    /// - `Error::NoFallbackFace` if `text` has nothing visible or no face
    ///   maps its first visible character
    pub fn resolve_fallback(
        &self,
        like: Option<&FontFace>,
        request: &StyleRequest,
        text: &str,
    ) -> Result<FontInstanceKey> {
        let face = self.select_fallback(like, request, text)?;
        let key = self.key_for(face, request);
        debug!("fallback for {text:?} is {} [{}]", key.face_id(), key.coords());
        Ok(key)
    }

    /// The best face among those covering the first character of `text` that
    /// is neither whitespace nor default ignorable. Ties keep the earlier face.
    pub fn select_fallback(
        &self,
        like: Option<&FontFace>,
        request: &StyleRequest,
        text: &str,
    ) -> Result<Arc<FontFace>> {
        let no_face = || Error::NoFallbackFace(text.to_string());
        let c = text.chars().find(|&c| !c.is_whitespace() && !is_default_ignorable(c));
        let c = c.ok_or_else(no_face)?;

        let registry = self.mapper.registry();
        let mut best: Option<(&Arc<FontFace>, FaceScore)> = None;

        for face in self.catalog.faces_covering(c) {
            let mut score = FaceScore::new(registry, face, request);
            if let Some(like) = like {
                score = score.with_like(like, face);
            }
            trace!("{}: {score:?}", face.id());
            if best.is_none_or(|(_, best_score)| score.compare(&best_score).is_lt()) {
                best = Some((face, score));
            }
        }

        best.map(|(face, _)| Arc::clone(face)).ok_or_else(no_face)
    }

    fn key_for(&self, face: Arc<FontFace>, request: &StyleRequest) -> FontInstanceKey {
        let mut coords = self.mapper.map(&face, request);
        clamp_to_face(self.mapper.registry(), &face, &mut coords);
        FontInstanceKey::new(face, coords)
    }
}

/// Clamp every coordinate to the face's own range, snapping discrete axes.
fn clamp_to_face(registry: &AxisRegistry, face: &FontFace, coords: &mut AxisCoordinates) {
    coords.map_values(|tag, value| {
        let Some(range) = face.axes().get(tag) else {
            return value;
        };
        let mut clamped = range.clamp(value);
        if let Some(descriptor) = registry.lookup(tag) {
            clamped = range.clamp(descriptor.snap(clamped));
        }
        if clamped != value {
            trace!("{}: {tag} {value} clamped to {clamped}", face.id());
        }
        clamped
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{FaceAxisSupport, FaceId},
        coverage::Coverage,
        registry::{ITAL, OPSZ, SLNT},
        variant::FaceStyle,
    };

    fn face(file: &str, style: FaceStyle, records: &[(Tag, f32, f32, f32)]) -> FontFace {
        let axes = FaceAxisSupport::from_records(records.iter().copied()).unwrap();
        FontFace::new(FaceId::new(file, 0), "Sample", style, axes)
    }

    fn resolver(faces: Vec<FontFace>) -> InstanceResolver {
        InstanceResolver::new(Arc::new(FontCatalog::from_faces(faces)), &EngineConfig::default())
    }

    fn path(key: &FontInstanceKey) -> String {
        key.face_id().path().display().to_string()
    }

    #[test]
    fn empty_family_is_an_error() {
        let resolver = resolver(vec![]);
        let err = resolver.resolve("Nope", &StyleRequest::new("Nope")).unwrap_err();
        assert!(matches!(err, Error::NoMatchingFace { family } if family == "Nope"));
    }

    #[test]
    fn clamps_to_face_range() {
        let resolver = resolver(vec![face(
            "var.ttf",
            FaceStyle::regular(),
            &[(WGHT, 100.0, 400.0, 900.0), (OPSZ, 8.0, 14.0, 40.0)],
        )]);
        let request = StyleRequest::new("Sample").weight(1000.0).size(6.0);
        let key = resolver.resolve("Sample", &request).unwrap();
        assert_eq!(key.coords().get(WGHT), Some(900.0));
        assert_eq!(key.coords().get(OPSZ), Some(8.0));
    }

    #[test]
    fn in_range_values_are_untouched() {
        let resolver = resolver(vec![face("var.ttf", FaceStyle::regular(), &[(WGHT, 100.0, 400.0, 900.0)])]);
        let key = resolver.resolve("Sample", &StyleRequest::new("Sample").weight(550.0)).unwrap();
        assert_eq!(key.coords().get(WGHT), Some(550.0));
    }

    #[test]
    fn explicit_ital_is_snapped() {
        let resolver = resolver(vec![face("var.ttf", FaceStyle::regular(), &[(ITAL, 0.0, 0.0, 1.0)])]);
        let key = resolver.resolve("Sample", &StyleRequest::new("Sample").axis(ITAL, 0.8)).unwrap();
        assert_eq!(key.coords().get(ITAL), Some(1.0));
    }

    #[test]
    fn picks_static_face_by_style() {
        let resolver = resolver(vec![
            face("Regular.ttf", FaceStyle::regular(), &[]),
            face("Italic.ttf", FaceStyle::italic(), &[]),
        ]);
        let key = resolver.resolve("Sample", &StyleRequest::new("Sample").italic(true)).unwrap();
        assert_eq!(path(&key), "Italic.ttf");
        assert!(key.coords().is_empty());

        let key = resolver.resolve("Sample", &StyleRequest::new("Sample")).unwrap();
        assert_eq!(path(&key), "Regular.ttf");
    }

    #[test]
    fn oblique_prefers_italic_over_normal() {
        let resolver = resolver(vec![
            face("Regular.ttf", FaceStyle::regular(), &[]),
            face("Italic.ttf", FaceStyle::italic(), &[]),
        ]);
        let key = resolver.resolve("Sample", &StyleRequest::new("Sample").slant(-10.0)).unwrap();
        assert_eq!(path(&key), "Italic.ttf");
    }

    #[test]
    fn picks_closest_static_weight() {
        let resolver = resolver(vec![
            face("Light.ttf", FaceStyle::regular().with_weight(300.0), &[]),
            face("Regular.ttf", FaceStyle::regular(), &[]),
            face("Bold.ttf", FaceStyle::regular().with_weight(700.0), &[]),
        ]);
        let key = resolver.resolve("Sample", &StyleRequest::new("Sample").weight(650.0)).unwrap();
        assert_eq!(path(&key), "Bold.ttf");
    }

    #[test]
    fn variable_face_beats_static_face_with_wrong_style() {
        let resolver = resolver(vec![
            face("Bold.ttf", FaceStyle::regular().with_weight(700.0), &[]),
            face("Var.ttf", FaceStyle::regular(), &[(WGHT, 100.0, 400.0, 900.0), (SLNT, -15.0, 0.0, 0.0)]),
        ]);
        let key =
            resolver.resolve("Sample", &StyleRequest::new("Sample").weight(700.0).italic(true)).unwrap();
        assert_eq!(path(&key), "Var.ttf");
        assert_eq!(key.coords().get(WGHT), Some(700.0));
        assert_eq!(key.coords().get(SLNT), Some(-14.0));
    }

    #[test]
    fn variable_weight_range_counts_as_exact() {
        let resolver = resolver(vec![
            face("Regular.ttf", FaceStyle::regular(), &[]),
            face("Var.ttf", FaceStyle::regular(), &[(WGHT, 100.0, 400.0, 900.0)]),
        ]);
        let key = resolver.resolve("Sample", &StyleRequest::new("Sample").weight(800.0)).unwrap();
        assert_eq!(path(&key), "Var.ttf");
    }

    #[test]
    fn ties_keep_first_face() {
        let resolver = resolver(vec![
            face("First.ttf", FaceStyle::regular(), &[]),
            face("Second.ttf", FaceStyle::regular(), &[]),
        ]);
        let key = resolver.resolve("Sample", &StyleRequest::new("Sample")).unwrap();
        assert_eq!(path(&key), "First.ttf");
    }

    #[test]
    fn explicit_wght_steers_selection() {
        let resolver = resolver(vec![
            face("Regular.ttf", FaceStyle::regular(), &[]),
            face("Bold.ttf", FaceStyle::regular().with_weight(700.0), &[]),
        ]);
        let key = resolver.resolve("Sample", &StyleRequest::new("Sample").axis(WGHT, 700.0)).unwrap();
        assert_eq!(path(&key), "Bold.ttf");
        assert!(key.coords().is_empty());
    }

    #[test]
    fn italic_axis_matches_both_directions() {
        let registry = AxisRegistry::standard();
        let upright = face("Var.ttf", FaceStyle::regular(), &[(ITAL, 0.0, 0.0, 1.0)]);
        let italic = face("VarItalic.ttf", FaceStyle::italic(), &[(ITAL, 0.0, 1.0, 1.0)]);
        assert_eq!(style_distance(registry, &upright, FontStyle::Italic), 0);
        assert_eq!(style_distance(registry, &italic, FontStyle::Normal), 0);
    }

    fn covering(family: &str, file: &str, style: FaceStyle, text: &str) -> FontFace {
        let axes = FaceAxisSupport::new();
        FontFace::new(FaceId::new(file, 0), family, style, axes)
            .with_coverage(Coverage::from_codepoints(text.chars().map(u32::from)))
    }

    #[test]
    fn fallback_picks_face_covering_first_visible_char() {
        let resolver = resolver(vec![
            covering("Latin Sans", "latin.ttf", FaceStyle::regular(), "abc"),
            covering("Arabic Sans", "arabic.ttf", FaceStyle::regular(), "\u{628}\u{627}"),
        ]);
        let request = StyleRequest::new("Anything");
        let key = resolver.resolve_fallback(None, &request, " \u{200D}\u{628}a").unwrap();
        assert_eq!(path(&key), "arabic.ttf");
        assert!(key.coords().is_empty());

        let face = resolver.select_fallback(None, &request, "\u{FEFF}b").unwrap();
        assert_eq!(face.family(), "Latin Sans");
    }

    #[test]
    fn fallback_without_visible_or_covered_char_fails() {
        let latin = covering("Latin Sans", "latin.ttf", FaceStyle::regular(), "abc");
        let resolver = resolver(vec![latin]);
        let request = StyleRequest::new("Anything");
        for text in ["", "  \t", "\u{200B}"] {
            let err = resolver.resolve_fallback(None, &request, text).unwrap_err();
            assert!(matches!(err, Error::NoFallbackFace(_)), "{text:?}");
        }
        let err = resolver.select_fallback(None, &request, "\u{4E00}").unwrap_err();
        assert!(matches!(err, Error::NoFallbackFace(t) if t == "\u{4E00}"));
    }

    #[test]
    fn fallback_prefers_family_like_reference_face() {
        let arabic = "\u{628}";
        let resolver = resolver(vec![
            covering("IBM Plex Arabic", "plex.ttf", FaceStyle::regular(), arabic),
            covering("Noto Sans Arabic UI", "noto-ui.ttf", FaceStyle::regular(), arabic),
            covering("Noto Sans Arabic", "noto.ttf", FaceStyle::regular(), arabic),
        ]);
        let like = covering("Noto Sans", "sans.ttf", FaceStyle::regular(), "abc");
        let request = StyleRequest::new("Noto Sans");

        let face = resolver.select_fallback(Some(&like), &request, arabic).unwrap();
        assert_eq!(face.family(), "Noto Sans Arabic");

        // Without a reference face only style matters, so the first one wins.
        let face = resolver.select_fallback(None, &request, arabic).unwrap();
        assert_eq!(face.family(), "IBM Plex Arabic");
    }

    #[test]
    fn fallback_matches_monospace_before_style() {
        let resolver = resolver(vec![
            covering("Sans", "sans-italic.ttf", FaceStyle::italic(), "x"),
            covering("Mono", "mono.ttf", FaceStyle::regular(), "x")
                .with_flags(FontFlags::MONOSPACE),
        ]);
        let like = covering("Code", "code.ttf", FaceStyle::italic(), "a")
            .with_flags(FontFlags::MONOSPACE);
        let request = StyleRequest::new("Code").italic(true);

        let face = resolver.select_fallback(Some(&like), &request, "x").unwrap();
        assert_eq!(face.family(), "Mono");
        let face = resolver.select_fallback(None, &request, "x").unwrap();
        assert_eq!(face.family(), "Sans");
    }

    #[test]
    fn like_score_orders_by_traits_then_words() {
        let like = covering("Noto Serif", "serif.ttf", FaceStyle::regular(), "")
            .with_flags(FontFlags::SERIF);
        let serif = covering("Noto Serif Hebrew", "a.ttf", FaceStyle::regular(), "")
            .with_flags(FontFlags::SERIF);
        let sans = covering("Noto Serif Hebrew", "b.ttf", FaceStyle::regular(), "");
        assert!(LikeScore::new(&like, &serif) < LikeScore::new(&like, &sans));
        assert_eq!(LikeScore::new(&like, &serif).shared_words, Reverse(2));
        assert_eq!(shared_prefix_words("Noto Sans CJK HK", "Noto Sans Arabic"), 2);
        assert_eq!(shared_prefix_words("IBM Plex Arabic", "Noto Sans"), 0);
    }

    #[test]
    fn upright_only_slant_cannot_produce_italic() {
        let registry = AxisRegistry::standard();
        let face = face("Var.ttf", FaceStyle::regular(), &[(SLNT, 0.0, 0.0, 10.0)]);
        assert_eq!(style_distance(registry, &face, FontStyle::Italic), 2);
    }
}
