mod ring;
mod ring_rns;
mod sampling;
