// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Fixed schema and starter corpus of the document index.

use lexis_search_engine::{Document, FieldType, IndexSchema};

pub const SEED_CORPUS: [(&str, &str); 4] = [
	(
		"para1",
		"India, officially the Republic of India (ISO: Bhārat Gaṇarājya), is a country in South Asia. It is the seventh-largest country by area; the most populous country as of June 2023; and from the time of its independence in 1947, the world's most populous democracy.",
	),
	(
		"para2",
		"Bounded by the Indian Ocean on the south, the Arabian Sea on the southwest, and the Bay of Bengal on the southeast, it shares land borders with Pakistan to the west; China, Nepal, and Bhutan to the north; and Bangladesh and Myanmar to the east. In the Indian Ocean, India is in the vicinity of Sri Lanka and the Maldives; its Andaman and Nicobar Islands share a maritime border with Thailand, Myanmar, and Indonesia.",
	),
	(
		"para3",
		"Modern humans arrived on the Indian subcontinent from Africa no later than 55,000 years ago. Their long occupation, initially in varying forms of isolation as hunter-gatherers, has made the region highly diverse, second only to Africa in human genetic diversity.",
	),
	(
		"para4",
		"Settled life emerged on the subcontinent in the western margins of the Indus river basin approximately 9,000 years ago, evolving gradually into the Indus Valley Civilisation of the third millennium BCE. By 1200 BCE, an archaic form of Sanskrit, an Indo-European language, had diffused into India from the northwest.",
	),
];

/// `id` is an exact-match keyword, `text` is analyzed for full-text search.
pub fn index_schema() -> IndexSchema {
	IndexSchema::new()
		.field("id", FieldType::Keyword)
		.field("text", FieldType::Text)
}

pub fn seed_documents() -> Vec<Document> {
	SEED_CORPUS
		.iter()
		.map(|(id, text)| Document::with_id(*id, *text))
		.collect()
}
