mod tests_definition_modules;
mod tests_dialects;
mod tests_entry_points;
mod tests_program_modules;
mod tests_recovery;
