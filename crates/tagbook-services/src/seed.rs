// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

/*!
Built-in starter catalog and the operations that load or clear it.
*/

use tracing::info;

use crate::traits::{FeatureService, MetaTagService};
use crate::types::{Example, NewFeature, NewMetaTag, ServiceResult};

/// Counts reported after seeding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub meta_tags: u64,
    pub features: u64,
}

fn meta_tag(
    name: &str,
    description: &str,
    syntax: &str,
    category: &str,
    examples: &[(&str, &str)],
) -> NewMetaTag {
    NewMetaTag {
        name: name.to_string(),
        description: description.to_string(),
        syntax: syntax.to_string(),
        examples: examples.iter().map(|(p, d)| Example::new(*p, *d)).collect(),
        category: category.to_string(),
    }
}

fn feature(
    title: &str,
    description: &str,
    how_to_use: &str,
    order: i64,
    examples: &[(&str, &str)],
) -> NewFeature {
    NewFeature {
        title: title.to_string(),
        description: description.to_string(),
        how_to_use: how_to_use.to_string(),
        examples: examples.iter().map(|(p, d)| Example::new(*p, *d)).collect(),
        image_url: String::new(),
        order,
    }
}

/// Starter meta tags
pub fn catalog_meta_tags() -> Vec<NewMetaTag> {
    vec![
        meta_tag(
            "Verse",
            "Used to specify lyrics for verse sections of the song",
            "[Verse] your verse lyrics here",
            "Structure",
            &[
                ("[Verse] Walking down the street, with sunshine on my face", "Simple verse example for a happy, upbeat song"),
            ],
        ),
        meta_tag(
            "Chorus",
            "Used to specify lyrics for chorus sections of the song",
            "[Chorus] your chorus lyrics here",
            "Structure",
            &[
                ("[Chorus] Never giving up, never falling down", "Motivational chorus example with repetitive pattern"),
            ],
        ),
        meta_tag(
            "Bridge",
            "Used to specify lyrics for bridge sections, typically contrasting with verse and chorus",
            "[Bridge] your bridge lyrics here",
            "Structure",
            &[
                ("[Bridge] And then I realized, everything has changed", "Reflective bridge with emotional shift"),
            ],
        ),
        meta_tag(
            "Instrumental",
            "Creates an instrumental section with no vocals",
            "[Instrumental]",
            "Instrumental",
            &[
                ("[Instrumental] A dreamy guitar solo that builds to a climax", "Instrumental section with descriptive guidance"),
            ],
        ),
        meta_tag(
            "Mood",
            "Sets the emotional tone of the song or section",
            "[Mood: type]",
            "Mood",
            &[
                ("[Mood: melancholic] I remember our days by the ocean", "Using mood to create a sad, nostalgic feeling"),
                ("[Mood: euphoric] Tonight we're alive and nothing can stop us", "Creating an energetic, positive atmosphere"),
            ],
        ),
        meta_tag(
            "Genre",
            "Specifies a musical genre for the song or section",
            "[Genre: type]",
            "Genre",
            &[
                ("[Genre: jazz] Smooth saxophone notes float through the city night", "Setting a jazz style for the entire prompt"),
                ("[Verse][Genre: rock] Breaking through the walls that hold me back", "Applying rock genre specifically to the verse"),
            ],
        ),
        meta_tag(
            "Vocals",
            "Specifies vocal style or characteristics",
            "[Vocals: type]",
            "Vocals",
            &[
                ("[Vocals: female alto] The mountains call to me", "Specifying a female alto voice"),
                ("[Vocals: whispered] I have a secret to tell you", "Creating a whispered vocal effect"),
            ],
        ),
        meta_tag(
            "Tempo",
            "Controls the speed or pace of the song",
            "[Tempo: speed]",
            "Other",
            &[
                ("[Tempo: fast] Running through the night, heart pounding", "Creating a fast-paced, energetic song"),
                ("[Tempo: slow] Gentle waves washing over the shore", "Setting a slow, relaxed tempo"),
            ],
        ),
    ]
}

/// Starter features
pub fn catalog_features() -> Vec<NewFeature> {
    vec![
        feature(
            "Custom Mode",
            "Custom Mode gives you more control over the music generation process by allowing you to specify detailed parameters.",
            "Access Custom Mode from the main Suno interface and use the advanced controls to adjust aspects like structure, instrumentation, and vocal characteristics.",
            1,
            &[
                ("[Verse] Walking through the forest [Chorus] Birds singing in harmony [Genre: folk] [Tempo: medium] [Vocals: male baritone]", "A folk song using custom structure tags and specific vocal type"),
            ],
        ),
        feature(
            "Song Extension",
            "The Song Extension feature allows you to continue or extend an existing Suno-generated track with additional sections.",
            "After generating an initial song, select the \"Extend\" option and provide additional prompt details for the next section.",
            2,
            &[
                ("Extend with [Bridge] The stars align, showing us the way [Instrumental] Dreamy synth solo that fades into the final chorus", "Adding a bridge and instrumental section to an existing song"),
            ],
        ),
        feature(
            "Audio Upload for Reinterpretation",
            "This feature allows you to upload an audio sample which Suno will analyze and reinterpret in a new style.",
            "Upload your audio file, then provide a prompt describing how you want Suno to reinterpret or transform the audio.",
            3,
            &[
                ("Reinterpret this piano melody as a full orchestral piece with dramatic strings and brass", "Transforming a simple piano recording into an orchestral arrangement"),
            ],
        ),
    ]
}

/// Replace both collections with the starter catalog
pub async fn seed_catalog(
    meta_tags: &dyn MetaTagService,
    features: &dyn FeatureService,
) -> ServiceResult<SeedSummary> {
    let summary = SeedSummary {
        meta_tags: meta_tags.replace_all_meta_tags(catalog_meta_tags()).await? as u64,
        features: features.replace_all_features(catalog_features()).await? as u64,
    };
    info!(
        target: "tagbook-services",
        "Seeded {} meta tags and {} features",
        summary.meta_tags,
        summary.features
    );
    Ok(summary)
}

/// Remove every meta tag and feature; returns how many were removed
pub async fn destroy_catalog(
    meta_tags: &dyn MetaTagService,
    features: &dyn FeatureService,
) -> ServiceResult<SeedSummary> {
    let summary = SeedSummary {
        meta_tags: meta_tags.clear_meta_tags().await?,
        features: features.clear_features().await?,
    };
    info!(
        target: "tagbook-services",
        "Removed {} meta tags and {} features",
        summary.meta_tags,
        summary.features
    );
    Ok(summary)
}

/// Seed only the collections that are currently empty
pub async fn seed_if_empty(
    meta_tags: &dyn MetaTagService,
    features: &dyn FeatureService,
) -> ServiceResult<SeedSummary> {
    let mut summary = SeedSummary::default();
    if meta_tags.list_meta_tags().await?.is_empty() {
        summary.meta_tags = meta_tags.replace_all_meta_tags(catalog_meta_tags()).await? as u64;
    }
    if features.list_features().await?.is_empty() {
        summary.features = features.replace_all_features(catalog_features()).await? as u64;
    }
    if summary != SeedSummary::default() {
        info!(
            target: "tagbook-services",
            "Seeded empty collections: {} meta tags, {} features",
            summary.meta_tags,
            summary.features
        );
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{FeatureServiceImpl, MetaTagServiceImpl};
    use crate::storage::Storage;
    use crate::types::MetaTagCategory;

    fn services() -> (MetaTagServiceImpl, FeatureServiceImpl) {
        let storage = Storage::memory();
        (
            MetaTagServiceImpl::new(storage.meta_tags.clone()),
            FeatureServiceImpl::new(storage.features.clone()),
        )
    }

    #[tokio::test]
    async fn test_seed_replaces_existing_content() {
        let (tags, features) = services();
        tags.create_meta_tag(meta_tag("Outro", "Ending", "[Outro]", "Structure", &[]))
            .await
            .unwrap();

        let summary = seed_catalog(&tags, &features).await.unwrap();
        assert_eq!(summary, SeedSummary { meta_tags: 8, features: 3 });

        let listed = tags.list_meta_tags().await.unwrap();
        assert_eq!(listed.len(), 8);
        assert!(listed.iter().all(|t| t.name != "Outro"));
        // category text order: Genre, Instrumental, Mood, Other, Structure, Vocals
        assert_eq!(listed[0].category, MetaTagCategory::Genre);
        assert_eq!(listed[3].name, "Tempo");
        assert_eq!(listed[4].name, "Bridge");

        let titles: Vec<String> = features
            .list_features()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.title)
            .collect();
        assert_eq!(
            titles,
            vec!["Custom Mode", "Song Extension", "Audio Upload for Reinterpretation"]
        );
    }

    #[tokio::test]
    async fn test_destroy_and_seed_if_empty() {
        let (tags, features) = services();
        seed_catalog(&tags, &features).await.unwrap();
        assert_eq!(
            seed_if_empty(&tags, &features).await.unwrap(),
            SeedSummary::default()
        );

        let removed = destroy_catalog(&tags, &features).await.unwrap();
        assert_eq!(removed, SeedSummary { meta_tags: 8, features: 3 });

        let seeded = seed_if_empty(&tags, &features).await.unwrap();
        assert_eq!(seeded, SeedSummary { meta_tags: 8, features: 3 });
    }
}
