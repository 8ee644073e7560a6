//! End-to-end link cleaning through the public normalizer API.

use slc_core::{LinkNormalizer, Normalizer, PlatformSpec, VideoReference};

fn normalizer(spec: PlatformSpec) -> Normalizer {
    Normalizer::from_spec(&spec).expect("built-in spec compiles")
}

#[test]
fn test_youtube_watch_link_is_shortened() {
    let youtube = normalizer(PlatformSpec::youtube());

    let cleaned = youtube.clean("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42&feature=share");

    assert_eq!(cleaned, "https://youtu.be/dQw4w9WgXcQ&t=42");
}

#[test]
fn test_bilibili_link_keeps_only_id_and_time() {
    let bilibili = normalizer(PlatformSpec::bilibili());

    let cleaned =
        bilibili.clean("https://www.bilibili.com/video/BV1xx411c7mD?t=127&spm_id_from=333.999");

    assert_eq!(cleaned, "https://www.bilibili.com/video/BV1xx411c7mD/?t=127");
}

#[test]
fn test_youtube_embed_and_shorts_paths() {
    let youtube = normalizer(PlatformSpec::youtube());

    assert_eq!(
        youtube.clean("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1"),
        "https://youtu.be/dQw4w9WgXcQ"
    );
    assert_eq!(
        youtube.clean("https://www.youtube.com/shorts/aBcDeFgHiJk?feature=share"),
        "https://youtu.be/aBcDeFgHiJk"
    );
}

#[test]
fn test_unrecognized_links_degrade_to_prefix() {
    for spec in [PlatformSpec::youtube(), PlatformSpec::bilibili()] {
        let prefix = spec.short_url.clone();
        let n = normalizer(spec);

        assert_eq!(n.extract("nothing to see here"), VideoReference::unrecognized());
        assert_eq!(n.clean("nothing to see here"), prefix);
    }
}

#[test]
fn test_canonical_bilibili_link_is_stable() {
    let bilibili = normalizer(PlatformSpec::bilibili());
    let canonical = "https://www.bilibili.com/video/BV1xx411c7mD/?t=127";

    assert_eq!(bilibili.clean(canonical), canonical);
}
