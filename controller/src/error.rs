// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use thiserror::Error as DError;

#[derive(Debug, Clone, DError)]
pub enum ErrorKind {
    #[error("Couldn't found movie with id({0})")]
    NotFoundById(String),

    #[error("Couldn't found movie with name({0})")]
    NotFoundByName(String),

    #[error("Couldn't found movie with {0}({1})")]
    NotFoundByCustom(String, String),

    #[error("Unknown text field '{0}'")]
    UnknownField(String),

    #[error("Dataset is missing the required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Dataset {0} has no movies")]
    EmptyDataset(String),
}
