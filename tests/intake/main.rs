mod consent;
mod form;
mod progress;
mod validation;
mod wizard;
