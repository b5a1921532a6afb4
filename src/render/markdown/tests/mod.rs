mod blocks;
mod helpers;
mod html;
mod inline;
