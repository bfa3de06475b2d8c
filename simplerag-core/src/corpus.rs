//! Corpus of short text facts
//!
//! Documents are identified by their 0-based position, fixed at construction.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// A corpus entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Position in the corpus
    pub id: usize,
    /// Fact text
    pub text: String,
}

/// Ordered, non-empty, immutable collection of documents
#[derive(Debug, Clone)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Build a corpus from texts, assigning ids by position
    ///
    /// # Errors
    /// `EmptyCorpus` for no texts, `InvalidInput` for a blank entry.
    pub fn new<I, S>(texts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let documents: Vec<Document> = texts
            .into_iter()
            .enumerate()
            .map(|(id, text)| Document {
                id,
                text: text.into(),
            })
            .collect();

        if documents.is_empty() {
            return Err(RagError::EmptyCorpus);
        }
        if let Some(doc) = documents.iter().find(|d| d.text.trim().is_empty()) {
            return Err(RagError::invalid_input(format!("document {} is empty", doc.id)));
        }

        Ok(Self { documents })
    }

    /// The built-in food and nutrition facts
    pub fn builtin() -> Self {
        Self {
            documents: BUILTIN_FACTS
                .iter()
                .enumerate()
                .map(|(id, text)| Document {
                    id,
                    text: (*text).to_string(),
                })
                .collect(),
        }
    }

    /// Load a corpus file
    ///
    /// `.json` files hold an array of strings; anything else is read as one
    /// fact per line, skipping blank lines and lines starting with `#`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| RagError::corpus(format!("Failed to read {}: {}", path.display(), e)))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let corpus = if is_json {
            Self::from_json(&content)
        } else {
            Self::from_lines(&content)
        }?;

        log::info!("Loaded corpus of {} documents from {}", corpus.len(), path.display());
        Ok(corpus)
    }

    /// Parse a JSON array of strings
    pub fn from_json(content: &str) -> Result<Self> {
        let texts: Vec<String> = serde_json::from_str(content)?;
        Self::new(texts)
    }

    /// One fact per non-blank, non-comment line
    pub fn from_lines(content: &str) -> Result<Self> {
        Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Document by id
    pub fn get(&self, id: usize) -> Option<&Document> {
        self.documents.get(id)
    }

    /// All documents in id order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Document texts in id order
    pub fn texts(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.text.as_str()).collect()
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Always false for a constructed corpus
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

const BUILTIN_FACTS: &[&str] = &[
    // Fruits
    "Apple is a common fruit, rich in vitamin C and dietary fiber",
    "Orange is a representative of citrus fruits, rich in vitamin C",
    "Banana is rich in potassium, which can replenish physical strength",
    "Grapes can be made into wine and contain various antioxidants",
    "Watermelon is one of the most popular fruits in summer, with high water content",
    "Strawberries are rich in vitamin C and anthocyanins, and are berries",
    "Blueberries are known as superfruits, rich in anthocyanins and antioxidants",
    "Dragon fruit is rich in nutrients, containing vitamin C and water-soluble dietary fiber",
    "Kiwi has extremely high vitamin C content, which helps to improve immunity",
    "Mango is rich in carotene, which can protect eyesight",
    "Grapefruit is a citrus fruit with the effect of reducing fire and clearing heat",
    "Pomegranate is rich in tannins and vitamins, with astringent effects",
    "Cherries contain a lot of anthocyanins, which can improve sleep",
    "Durian is known as the king of fruits, rich in protein",
    "Mangosteen has white flesh, sweet taste, and is rich in various vitamins",
    "Figs are mild in nature and have the effect of moisturizing the lungs and relieving cough",
    "Jujube is rich in vitamin C and iron, which can replenish blood",
    "Persimmons are rich in carotene, which can protect eyesight",
    "Pineapple contains bromelain, which helps digest protein",
    "Plums are rich in organic acids, which can promote metabolism",
    // Vegetables
    "Tomatoes are rich in lycopene, a high-quality antioxidant",
    "Carrots are rich in carotene, which is good for the eyes",
    "Spinach is rich in iron and is a good food for iron supplementation",
    "Cucumbers have high water content and are suitable for summer consumption",
    "Eggplants are rich in vitamin P, which can protect the cardiovascular system",
    "Green peppers are rich in vitamin C and are a good anti-scurvy medicine",
    "Cabbage is one of the most common vegetables, rich in vitamins",
    "Leeks are rich in vitamin K, which can promote blood clotting",
    "Celery has the effect of lowering blood pressure and is suitable for hypertensive patients",
    "Pumpkin is rich in carotene, which can protect eyesight",
    "Potatoes are rich in carbohydrates and vitamin C",
    "Lotus root is rich in dietary fiber and can aid digestion",
    "Bean sprouts are rich in vitamin E and can resist aging",
    "Lettuce has high water content and low calories, suitable for weight loss",
    "Asparagus is a low-fat, high-nutrition vegetable",
    "Cauliflower is rich in vitamin C and calcium",
    "Water spinach is rich in iron and can replenish blood",
    "Bitter melon has the effect of lowering blood sugar",
    "Winter melon has high water content and has a diuretic and swelling effect",
    "Radish has the effect of promoting fluid production and quenching thirst",
    // Grains
    "Rice is one of the most important food crops",
    "Wheat is rich in protein and carbohydrates",
    "Corn is rich in dietary fiber and vitamin B",
    "Oats are rich in beta-glucan, which can lower cholesterol",
    "Black rice contains anthocyanins and is a good food for health care",
    "Brown rice retains the bran layer and has higher nutritional value",
    "Barley has the effect of promoting water metabolism and reducing swelling",
    "Sorghum is rich in iron and B vitamins",
    "Millet is rich in minerals, especially iron and zinc",
    "Buckwheat contains rutin, which can protect blood vessels",
    "Barley is rich in dietary fiber and can promote intestinal health",
    "Purple rice contains anthocyanins and has antioxidant effects",
    "Red rice contains anthocyanins and can replenish blood and nourish the skin",
    "Japonica rice is the most common type of rice",
    "Glutinous rice is mild in nature and suitable for making desserts",
    "Highland barley is the main grain in plateau areas",
    "Gorgon fruit has the effect of strengthening the spleen and stomach",
    "Lotus seeds have the effect of nourishing the heart and calming the mind",
    "Lily has the effect of moisturizing the lungs and relieving cough",
    "Red beans are rich in protein and iron",
    // Nuts
    "Peanuts are rich in protein and unsaturated fatty acids",
    "Almonds are rich in vitamin E and protein",
    "Walnuts have the effect of nourishing the brain",
    "Pistachios are rich in unsaturated fatty acids",
    "Cashews are rich in protein and minerals",
    "Hazelnuts are rich in vitamin E and B vitamins",
    "Pine nuts are rich in protein and unsaturated fatty acids",
    "Sunflower seeds are rich in vitamin E and oils",
    "Pumpkin seeds are rich in zinc and iron",
    "Sesame seeds are rich in calcium and vitamin E",
    "Ginkgo has the effect of relieving cough and reducing phlegm",
    "Chestnuts are rich in carbohydrates and vitamin C",
    "Macadamia nuts are rich in unsaturated fatty acids",
    "Almonds are rich in vitamin E",
    "Pecans are rich in unsaturated fatty acids",
    "Pistachios have the effect of lowering cholesterol",
    "Hops have the effect of improving eyesight",
    "Cypress seeds have the effect of nourishing the heart and calming the mind",
    "Ginkgo biloba has the effect of promoting blood circulation and removing blood stasis",
    "Maca has the effect of improving immunity",
];
