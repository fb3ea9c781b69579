use crate::RouteError;
use regex::Regex;

/// Characters a placeholder name may use, and the characters a placeholder captures.
const SEGMENT_CLASS: &str = "[A-Za-z0-9_]+";

fn is_placeholder_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_'
}

/// A compiled route template such as `/new-password/{token}`.
///
/// The template is anchored at both ends, so it only matches a path it accounts for entirely.
/// Every placeholder captures one or more of `[A-Za-z0-9_]` and therefore never spans a `/`.
#[derive(Debug, Clone)]
pub struct PathPattern {
	template: String,
	regex: Regex,
	placeholders: Vec<String>,
}

impl PathPattern {
	pub fn compile(template: &str) -> Result<Self, RouteError> {
		let mut source = String::with_capacity(template.len() + 2);
		let mut placeholders: Vec<String> = Vec::new();
		let bytes = template.as_bytes();
		let mut literal_start = 0;
		let mut pos = 0;

		source.push('^');
		while pos < bytes.len() {
			match bytes[pos] {
				b'{' => {
					source.push_str(&regex::escape(&template[literal_start..pos]));

					let rest = &template[pos + 1..];
					let end = match rest.find(|c: char| c == '{' || c == '}') {
						Some(offset) if rest.as_bytes()[offset] == b'}' => pos + 1 + offset,
						_ => {
							return Err(RouteError::UnclosedBrace {
								template: template.to_owned(),
								position: pos,
							})
						}
					};

					let name = &template[pos + 1..end];
					if name.is_empty() {
						return Err(RouteError::EmptyPlaceholder {
							template: template.to_owned(),
							position: pos,
						});
					}
					if !name.chars().all(is_placeholder_char) {
						return Err(RouteError::InvalidPlaceholder {
							template: template.to_owned(),
							name: name.to_owned(),
						});
					}
					if placeholders.iter().any(|existing| existing == name) {
						return Err(RouteError::DuplicatePlaceholder {
							template: template.to_owned(),
							name: name.to_owned(),
						});
					}

					source.push('(');
					source.push_str(SEGMENT_CLASS);
					source.push(')');
					placeholders.push(name.to_owned());

					pos = end + 1;
					literal_start = pos;
				}
				b'}' => {
					return Err(RouteError::UnexpectedBrace {
						template: template.to_owned(),
						position: pos,
					})
				}
				_ => pos += 1,
			}
		}
		source.push_str(&regex::escape(&template[literal_start..]));
		source.push('$');

		let regex = Regex::new(&source).map_err(|source| RouteError::Pattern {
			template: template.to_owned(),
			source,
		})?;

		Ok(Self {
			template: template.to_owned(),
			regex,
			placeholders,
		})
	}

	pub fn template(&self) -> &str {
		&self.template
	}

	/// Placeholder names in the order they appear in the template.
	pub fn placeholders(&self) -> &[String] {
		&self.placeholders
	}

	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Matches `path` against the template, returning the captured placeholder values.
	pub fn captures(&self, path: &str) -> Option<Params> {
		let captures = self.regex.captures(path)?;
		let entries = self
			.placeholders
			.iter()
			.enumerate()
			.map(|(i, name)| {
				let value = captures.get(i + 1).map_or("", |m| m.as_str());
				(name.clone(), value.to_owned())
			})
			.collect();

		Some(Params { entries })
	}
}

/// Placeholder values captured from a request path, in template order.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Params {
	entries: Vec<(String, String)>,
}

impl Params {
	pub fn get(&self, name: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_str()))
	}

	/// The captured values alone, as positional arguments.
	pub fn into_values(self) -> Vec<String> {
		self.entries.into_iter().map(|(_, value)| value).collect()
	}
}

#[cfg(test)]
mod test {
	use super::PathPattern;
	use crate::RouteError;

	fn values(pattern: &PathPattern, path: &str) -> Option<Vec<String>> {
		pattern.captures(path).map(|params| params.into_values())
	}

	#[test]
	fn literal_templates_match_exactly() {
		let pattern = PathPattern::compile("/login").unwrap();

		assert!(pattern.is_match("/login"));
		assert!(!pattern.is_match("/login/"));
		assert!(!pattern.is_match("/logins"));
		assert!(!pattern.is_match("/auth/login"));
		assert!(pattern.placeholders().is_empty());

		let root = PathPattern::compile("/").unwrap();
		assert!(root.is_match("/"));
		assert!(!root.is_match(""));
		assert!(!root.is_match("/x"));
	}

	#[test]
	fn literal_text_is_not_a_regex() {
		let pattern = PathPattern::compile("/files/a.b+c").unwrap();

		assert!(pattern.is_match("/files/a.b+c"));
		assert!(!pattern.is_match("/files/aXb+c"));
		assert!(!pattern.is_match("/files/a.bbc"));
	}

	#[test]
	fn captures_placeholders_in_order() {
		let pattern = PathPattern::compile("/posts/{post_id}/comments/{id}").unwrap();
		assert_eq!(pattern.placeholders(), ["post_id".to_string(), "id".to_string()]);

		let params = pattern.captures("/posts/42/comments/abc_9").unwrap();
		assert_eq!(params.len(), 2);
		assert_eq!(params.get("post_id"), Some("42"));
		assert_eq!(params.get("id"), Some("abc_9"));
		assert_eq!(params.get("missing"), None);
		assert_eq!(
			params.iter().collect::<Vec<_>>(),
			vec![("post_id", "42"), ("id", "abc_9")]
		);
	}

	#[test]
	fn placeholders_capture_a_single_segment() {
		let pattern = PathPattern::compile("/users/{id}").unwrap();

		assert_eq!(values(&pattern, "/users/abc"), Some(vec!["abc".to_string()]));
		assert_eq!(values(&pattern, "/users/abc/extra"), None);
		assert_eq!(values(&pattern, "/users/"), None);
		assert_eq!(values(&pattern, "/users"), None);
		assert_eq!(values(&pattern, "/users/a-b"), None);
		assert_eq!(values(&pattern, "/users/a%20b"), None);
	}

	#[test]
	fn placeholders_may_sit_inside_a_segment() {
		let pattern = PathPattern::compile("/reports/{year}.csv").unwrap();

		assert_eq!(values(&pattern, "/reports/2024.csv"), Some(vec!["2024".to_string()]));
		assert_eq!(values(&pattern, "/reports/2024.json"), None);
	}

	#[test]
	fn rejects_unbalanced_braces() {
		assert!(matches!(
			PathPattern::compile("/users/{id"),
			Err(RouteError::UnclosedBrace { position: 7, .. })
		));
		assert!(matches!(
			PathPattern::compile("/users/id}"),
			Err(RouteError::UnexpectedBrace { position: 9, .. })
		));
		assert!(matches!(
			PathPattern::compile("/users/{a{b}}"),
			Err(RouteError::UnclosedBrace { position: 7, .. })
		));
	}

	#[test]
	fn rejects_bad_placeholder_names() {
		assert!(matches!(
			PathPattern::compile("/users/{}"),
			Err(RouteError::EmptyPlaceholder { position: 7, .. })
		));
		assert!(matches!(
			PathPattern::compile("/users/{user-id}"),
			Err(RouteError::InvalidPlaceholder { ref name, .. }) if name == "user-id"
		));
		assert!(matches!(
			PathPattern::compile("/{id}/{id}"),
			Err(RouteError::DuplicatePlaceholder { ref name, .. }) if name == "id"
		));
	}
}
