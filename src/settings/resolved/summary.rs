use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	let widget = &config.widget;
	println!("Effective configuration:");
	for list in &config.lists {
		let selected = list.options.iter().filter(|option| option.selected).count();
		println!(
			"  List {}: {} options, {selected} selected",
			list.id,
			list.options.len()
		);
	}
	println!("  Width: {}", widget.width);
	println!(
		"  Label: {}",
		widget.label.as_deref().unwrap_or("(list name when several)")
	);
	println!("  Show every selected text: {}", bool_to_word(widget.show_selected_fit));
	println!("  Match mode: {:?}", widget.match_mode);
	if let Some(class) = &widget.filter_focus_class {
		println!("  Filter focus class: {class}");
	}
	println!(
		"  Timings: debounce {}ms, height {}ms, focus {}ms, max height {}px",
		widget.timings.debounce_ms,
		widget.timings.height_delay_ms,
		widget.timings.focus_delay_ms,
		widget.timings.max_height
	);
	println!(
		"  UI theme: {}",
		config.theme.as_deref().unwrap_or("(use the library default)")
	);
	if let Some(title) = &config.title {
		println!("  Title: {title}");
	}
	println!("  Log pane: {}", bool_to_word(config.show_log));
	println!("  Log level: {}", config.log_level);
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
