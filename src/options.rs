//! Option lists fed to the widgets.
//!
//! Lists come from a JSON document or from `value=text` items. A document is
//! either an array of options, which becomes a single list, or an object
//! mapping list names to arrays, which becomes one list per name in name
//! order. An option is `{"value": .., "text": .., "selected": ..}` where
//! `text` defaults to the value and `selected` to `false`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use multisel_core::SelectOption;
use serde::Deserialize;
use thiserror::Error;

/// Name given to a list that was not named by its source.
pub const DEFAULT_LIST: &str = "options";

#[derive(Debug, Error)]
pub enum OptionsError {
	#[error("failed to read options from {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to parse options: {0}")]
	Parse(#[from] serde_json::Error),
	#[error("option item `{item}` has an empty value")]
	EmptyValue { item: String },
	#[error("list `{id}` has no options")]
	EmptyList { id: String },
}

/// One named option list, mounted as one widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionList {
	pub id: String,
	pub options: Vec<SelectOption>,
}

impl OptionList {
	pub fn new(id: impl Into<String>, options: Vec<SelectOption>) -> Self {
		Self {
			id: id.into(),
			options,
		}
	}

	/// Mark every option whose value is in `values` as selected.
	pub fn preselect(&mut self, values: &[String]) {
		for option in &mut self.options {
			if values.iter().any(|value| *value == option.value) {
				option.selected = true;
			}
		}
	}
}

#[derive(Deserialize)]
struct OptionRecord {
	value: String,
	text: Option<String>,
	#[serde(default)]
	selected: bool,
}

impl From<OptionRecord> for SelectOption {
	fn from(record: OptionRecord) -> Self {
		let text = record.text.unwrap_or_else(|| record.value.clone());
		let option = SelectOption::new(record.value, text);
		if record.selected {
			option.selected()
		} else {
			option
		}
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OptionDocument {
	List(Vec<OptionRecord>),
	Named(BTreeMap<String, Vec<OptionRecord>>),
}

/// Parse a JSON option document.
pub fn parse_document(text: &str) -> Result<Vec<OptionList>, OptionsError> {
	let lists = match serde_json::from_str(text)? {
		OptionDocument::List(records) => vec![to_list(DEFAULT_LIST, records)],
		OptionDocument::Named(named) => named
			.into_iter()
			.map(|(id, records)| to_list(&id, records))
			.collect(),
	};
	if let Some(empty) = lists.iter().find(|list| list.options.is_empty()) {
		return Err(OptionsError::EmptyList {
			id: empty.id.clone(),
		});
	}
	Ok(lists)
}

/// Read and parse a JSON option document from disk.
pub fn load_file(path: &Path) -> Result<Vec<OptionList>, OptionsError> {
	let text = fs::read_to_string(path).map_err(|source| OptionsError::Read {
		path: path.to_path_buf(),
		source,
	})?;
	parse_document(&text)
}

/// Parse a `value=text` item. A bare `value` uses the value as its text.
pub fn parse_item(item: &str) -> Result<SelectOption, OptionsError> {
	let (value, text) = match item.split_once('=') {
		Some((value, text)) => (value.trim(), text.trim()),
		None => (item.trim(), item.trim()),
	};
	if value.is_empty() {
		return Err(OptionsError::EmptyValue {
			item: item.to_string(),
		});
	}
	let text = if text.is_empty() { value } else { text };
	Ok(SelectOption::new(value, text))
}

/// Build the default list from command-line items.
pub fn from_items<S: AsRef<str>>(items: &[S]) -> Result<OptionList, OptionsError> {
	let options = items
		.iter()
		.map(|item| parse_item(item.as_ref()))
		.collect::<Result<Vec<_>, _>>()?;
	if options.is_empty() {
		return Err(OptionsError::EmptyList {
			id: DEFAULT_LIST.to_string(),
		});
	}
	Ok(OptionList::new(DEFAULT_LIST, options))
}

fn to_list(id: &str, records: Vec<OptionRecord>) -> OptionList {
	OptionList::new(id, records.into_iter().map(SelectOption::from).collect())
}
