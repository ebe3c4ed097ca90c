mod material;
mod suggestion;
