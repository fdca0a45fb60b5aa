pub mod math {
    pub mod matrix;
    pub mod rational;
    pub mod traits;
}
pub mod optimisation_algorithms {
    pub mod back_substitution;
    pub mod branch_and_bound;
    pub mod free_variable_bounds;
    pub mod linear_system;
    pub mod search_parameters;
}
pub mod objects {
    pub mod equations;
    pub mod machine;
}
pub mod techniques {
    pub mod button_presses;
}
pub mod commands;
pub mod line_reader;
