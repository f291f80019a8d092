mod devices;
mod groups;
mod ir;
mod remote;
