mod indirect_map;
