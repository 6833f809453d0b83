//! Pretrained binary classifier
//!
//! The model is exported once at training time as JSON and loaded at startup.
//! Feature references are resolved to schema positions on load, so scoring is
//! a plain walk over the aligned matrix.

use serde::Deserialize;
use shared::forecast::{FeatureMatrix, FeatureSchema};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Produces one order probability per aligned feature row
pub trait Scorer: Send + Sync {
    /// Short model family name, for logs and health output
    fn kind(&self) -> &'static str;

    fn predict_proba(&self, matrix: &FeatureMatrix) -> AppResult<Vec<f64>>;
}

/// Serialized model, tagged by `kind`
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ModelArtifact {
    Logistic {
        intercept: f64,
        weights: HashMap<String, f64>,
    },
    TreeEnsemble {
        #[serde(default)]
        base_score: f64,
        trees: Vec<TreeArtifact>,
    },
}

#[derive(Debug, Deserialize)]
struct TreeArtifact {
    nodes: Vec<NodeArtifact>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodeArtifact {
    Split {
        feature: String,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `x[feature] < threshold` goes left
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn margin(&self, row: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf(value) => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] < *threshold { *left } else { *right };
                }
            }
        }
    }
}

/// Classifier ready to score rows aligned to its schema
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierModel {
    Logistic { intercept: f64, weights: Vec<f64> },
    TreeEnsemble { base_score: f64, trees: Vec<Tree> },
}

impl ClassifierModel {
    /// Load a model file and bind it to `schema`
    pub fn load(path: impl AsRef<Path>, schema: &FeatureSchema) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!("Could not read model '{}': {}", path.display(), e))
        })?;
        Self::from_json(&raw, schema)
    }

    pub fn from_json(raw: &str, schema: &FeatureSchema) -> AppResult<Self> {
        let artifact: ModelArtifact = serde_json::from_str(raw)
            .map_err(|e| AppError::Configuration(format!("Invalid model file: {}", e)))?;
        Self::from_artifact(artifact, schema)
    }

    fn from_artifact(artifact: ModelArtifact, schema: &FeatureSchema) -> AppResult<Self> {
        match artifact {
            ModelArtifact::Logistic { intercept, weights } => {
                let mut dense = vec![0.0; schema.len()];
                for (feature, weight) in weights {
                    dense[resolve(schema, &feature)?] = weight;
                }
                Ok(ClassifierModel::Logistic {
                    intercept,
                    weights: dense,
                })
            }
            ModelArtifact::TreeEnsemble { base_score, trees } => {
                if trees.is_empty() {
                    return Err(AppError::Configuration("Tree ensemble has no trees".to_string()));
                }
                let trees = trees
                    .into_iter()
                    .enumerate()
                    .map(|(tree_index, tree)| compile_tree(tree_index, tree, schema))
                    .collect::<AppResult<Vec<_>>>()?;
                Ok(ClassifierModel::TreeEnsemble { base_score, trees })
            }
        }
    }

    fn width(&self) -> Option<usize> {
        match self {
            ClassifierModel::Logistic { weights, .. } => Some(weights.len()),
            ClassifierModel::TreeEnsemble { .. } => None,
        }
    }

    fn margin(&self, row: &[f64]) -> f64 {
        match self {
            ClassifierModel::Logistic { intercept, weights } => {
                intercept + weights.iter().zip(row).map(|(w, x)| w * x).sum::<f64>()
            }
            ClassifierModel::TreeEnsemble { base_score, trees } => {
                base_score + trees.iter().map(|tree| tree.margin(row)).sum::<f64>()
            }
        }
    }
}

/// Scorer bound to the schema it was loaded against
#[derive(Debug, Clone)]
pub struct SchemaBoundScorer {
    model: ClassifierModel,
    width: usize,
}

impl SchemaBoundScorer {
    pub fn new(model: ClassifierModel, schema: &FeatureSchema) -> Self {
        Self {
            model,
            width: schema.len(),
        }
    }
}

impl Scorer for SchemaBoundScorer {
    fn kind(&self) -> &'static str {
        match self.model {
            ClassifierModel::Logistic { .. } => "logistic",
            ClassifierModel::TreeEnsemble { .. } => "tree_ensemble",
        }
    }

    fn predict_proba(&self, matrix: &FeatureMatrix) -> AppResult<Vec<f64>> {
        let expected = self.model.width().unwrap_or(self.width);
        if matrix.rows() > 0 && matrix.width() != expected {
            return Err(AppError::Internal(format!(
                "Feature matrix has {} columns, model expects {}",
                matrix.width(),
                expected
            )));
        }

        Ok(matrix
            .iter_rows()
            .map(|row| sigmoid(self.model.margin(row)))
            .collect())
    }
}

fn resolve(schema: &FeatureSchema, feature: &str) -> AppResult<usize> {
    schema.position(feature).ok_or_else(|| {
        AppError::Configuration(format!("Model references unknown feature column '{}'", feature))
    })
}

fn compile_tree(tree_index: usize, tree: TreeArtifact, schema: &FeatureSchema) -> AppResult<Tree> {
    if tree.nodes.is_empty() {
        return Err(AppError::Configuration(format!("Tree {} has no nodes", tree_index)));
    }

    let len = tree.nodes.len();
    let nodes = tree
        .nodes
        .into_iter()
        .enumerate()
        .map(|(index, node)| match node {
            NodeArtifact::Leaf { leaf } => Ok(Node::Leaf(leaf)),
            NodeArtifact::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                // Children must come after their parent, which also rules out cycles
                for child in [left, right] {
                    if child <= index || child >= len {
                        return Err(AppError::Configuration(format!(
                            "Tree {} node {} has invalid child index {}",
                            tree_index, index, child
                        )));
                    }
                }
                Ok(Node::Split {
                    feature: resolve(schema, &feature)?,
                    threshold,
                    left,
                    right,
                })
            }
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Tree { nodes })
}

fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}
