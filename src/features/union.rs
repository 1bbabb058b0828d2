use log::debug;

use super::{Extractor, FeatureError, FeatureExtractor, FeatureMatrix};

/// An ordered list of named extractors whose outputs are concatenated column-wise
#[derive(Default)]
pub struct FeatureUnion {
    members: Vec<(String, Extractor)>,
}

impl FeatureUnion {
    /// An empty union
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member, builder style
    pub fn with_member<E: Into<Extractor>>(
        mut self,
        name: &str,
        extractor: E,
    ) -> Result<Self, FeatureError> {
        self.push(name, extractor)?;

        Ok(self)
    }

    /// Append a member after the existing ones. Member names must be unique.
    pub fn push<E: Into<Extractor>>(&mut self, name: &str, extractor: E) -> Result<(), FeatureError> {
        if self.members.iter().any(|(existing, _)| existing == name) {
            return Err(FeatureError::InvalidConfig(format!(
                "duplicate feature union member: {name}"
            )));
        }

        self.members.push((name.to_string(), extractor.into()));

        Ok(())
    }

    /// The member names, in column order
    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// The number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the union has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FeatureExtractor for FeatureUnion {
    fn fit(&mut self, documents: &[String]) -> Result<(), FeatureError> {
        for (_, extractor) in self.members.iter_mut() {
            extractor.fit(documents)?;
        }

        Ok(())
    }

    fn transform(&self, documents: &[String]) -> Result<FeatureMatrix, FeatureError> {
        let mut blocks = Vec::with_capacity(self.members.len());

        for (name, extractor) in &self.members {
            let block = extractor.transform(documents)?;
            let width = extractor.width()?;

            if block.rows() != documents.len() {
                return Err(FeatureError::InternalConsistency(format!(
                    "member {name} produced {} rows for {} documents",
                    block.rows(),
                    documents.len()
                )));
            }

            if block.width() != width {
                return Err(FeatureError::InternalConsistency(format!(
                    "member {name} produced {} columns, declared {width}",
                    block.width()
                )));
            }

            debug!("Feature union member {} contributed {} columns", name, width);

            blocks.push(block);
        }

        FeatureMatrix::hstack(documents.len(), &blocks)
    }

    fn width(&self) -> Result<usize, FeatureError> {
        self.members
            .iter()
            .map(|(_, extractor)| extractor.width())
            .sum()
    }

    fn feature_names(&self) -> Result<Vec<String>, FeatureError> {
        let mut names = Vec::new();

        for (member, extractor) in &self.members {
            names.extend(
                extractor
                    .feature_names()?
                    .into_iter()
                    .map(|name| format!("{member}__{name}")),
            );
        }

        Ok(names)
    }
}
